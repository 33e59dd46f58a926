use serde::Serialize;

use super::{BankCard, MessageLine, RenderTargets, RiskFlagsView};

/// Display regions held in memory, for embedding front ends and tests.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MemoryTargets {
    pub loading_visible: bool,
    pub content_visible: bool,
    pub risk_flags: RiskFlagsView,
    pub suggestions: Vec<MessageLine>,
    pub bank_cards: Vec<BankCard>,
}

impl RenderTargets for MemoryTargets {
    fn set_loading(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn set_content_visible(&mut self, visible: bool) {
        self.content_visible = visible;
    }

    fn set_risk_flags(&mut self, view: RiskFlagsView) {
        self.risk_flags = view;
    }

    fn set_suggestions(&mut self, items: Vec<MessageLine>) {
        self.suggestions = items;
    }

    fn set_bank_cards(&mut self, cards: Vec<BankCard>) {
        self.bank_cards = cards;
    }
}
