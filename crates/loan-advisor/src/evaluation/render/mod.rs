//! Rendering of evaluation outcomes into the result page's display regions.
//!
//! [`ResultRenderer`] owns the `Idle -> Loading -> Success | Failure` progression and
//! writes through [`RenderTargets`], so any front end (terminal, web view, test double)
//! can host the regions.

mod memory;

pub use memory::MemoryTargets;

use serde::Serialize;

use super::client::NetworkFailure;
use super::domain::{BankChance, EvaluationReport, EvaluationResult};

pub const ANALYZING: &str = "Analyserer data...";
pub const RISK_FLAGS_HEADING: &str = "Risiko Flagg funnet:";
pub const NO_RISK_FLAGS: &str = "Ingen risikoflagg funnet.";
pub const NO_SUGGESTIONS: &str = "Ingen forbedringer nødvendig.";
pub const UNKNOWN_ERROR: &str = "Ukjent feil";
pub const ANALYSIS_INCOMPLETE: &str = "Kunne ikke fullføre analysen.";
pub const CHECK_SERVER: &str = "Kontroller at serveren er tilgjengelig.";

/// Bank chances strictly above this percentage are highlighted.
pub const HIGH_CHANCE_THRESHOLD: f64 = 60.0;

/// Display regions the renderer writes to.
pub trait RenderTargets {
    fn set_loading(&mut self, visible: bool);
    fn set_content_visible(&mut self, visible: bool);
    fn set_risk_flags(&mut self, view: RiskFlagsView);
    fn set_suggestions(&mut self, items: Vec<MessageLine>);
    fn set_bank_cards(&mut self, cards: Vec<BankCard>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Progress or heading text.
    Info,
    /// Placeholder shown when a list has nothing to report.
    Neutral,
    /// A flagged risk or an error.
    Error,
    /// A regular list entry.
    Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageLine {
    pub text: String,
    pub tone: Tone,
}

impl MessageLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RiskFlagsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub lines: Vec<MessageLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankCard {
    pub bank_name: String,
    pub chance: f64,
    pub high_chance: bool,
}

impl From<&BankChance> for BankCard {
    fn from(entry: &BankChance) -> Self {
        Self {
            bank_name: entry.bank_name.clone(),
            chance: entry.chance,
            high_chance: entry.chance > HIGH_CHANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    Idle,
    Loading,
    Success,
    Failure,
}

pub struct ResultRenderer<T> {
    targets: T,
    state: RenderState,
}

impl<T: RenderTargets> ResultRenderer<T> {
    pub fn new(targets: T) -> Self {
        Self {
            targets,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn targets(&self) -> &T {
        &self.targets
    }

    pub fn into_targets(self) -> T {
        self.targets
    }

    /// Shows the busy indicator for a submission that has just started.
    pub fn begin(&mut self) {
        self.targets.set_loading(true);
        self.targets.set_content_visible(false);
        self.targets.set_risk_flags(RiskFlagsView {
            heading: None,
            lines: vec![MessageLine::new(ANALYZING, Tone::Info)],
        });
        self.targets.set_suggestions(Vec::new());
        self.state = RenderState::Loading;
    }

    pub fn render(&mut self, outcome: &Result<EvaluationResult, NetworkFailure>) -> RenderState {
        match outcome {
            Ok(result) => self.render_result(result),
            Err(failure) => self.render_network_failure(failure),
        }
    }

    pub fn render_result(&mut self, result: &EvaluationResult) -> RenderState {
        self.reveal();
        match result {
            EvaluationResult::Success(report) => {
                self.render_report(report);
                self.state = RenderState::Success;
            }
            EvaluationResult::Failure { message } => {
                let message = message.as_deref().unwrap_or(UNKNOWN_ERROR);
                self.render_failure(format!("Analyse Feil: {message}"), ANALYSIS_INCOMPLETE);
            }
        }
        self.state
    }

    pub fn render_network_failure(&mut self, failure: &NetworkFailure) -> RenderState {
        self.reveal();
        self.render_failure(
            format!("Nettverksfeil: Kunne ikke koble til API ({failure})"),
            CHECK_SERVER,
        );
        self.state
    }

    fn reveal(&mut self) {
        self.targets.set_loading(false);
        self.targets.set_content_visible(true);
    }

    fn render_report(&mut self, report: &EvaluationReport) {
        let flags = if report.risk_flags.is_empty() {
            RiskFlagsView {
                heading: None,
                lines: vec![MessageLine::new(NO_RISK_FLAGS, Tone::Neutral)],
            }
        } else {
            RiskFlagsView {
                heading: Some(RISK_FLAGS_HEADING.to_string()),
                lines: report
                    .risk_flags
                    .iter()
                    .map(|flag| MessageLine::new(flag.as_str(), Tone::Error))
                    .collect(),
            }
        };
        self.targets.set_risk_flags(flags);

        let suggestions = if report.suggestions.is_empty() {
            vec![MessageLine::new(NO_SUGGESTIONS, Tone::Neutral)]
        } else {
            report
                .suggestions
                .iter()
                .map(|item| MessageLine::new(item.as_str(), Tone::Item))
                .collect()
        };
        self.targets.set_suggestions(suggestions);

        self.targets
            .set_bank_cards(report.bank_chances.iter().map(BankCard::from).collect());
    }

    fn render_failure(&mut self, headline: String, guidance: &str) {
        self.targets.set_risk_flags(RiskFlagsView {
            heading: None,
            lines: vec![MessageLine::new(headline, Tone::Error)],
        });
        self.targets
            .set_suggestions(vec![MessageLine::new(guidance, Tone::Neutral)]);
        self.targets.set_bank_cards(Vec::new());
        self.state = RenderState::Failure;
    }
}
