use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::evaluation::client::{EvaluationClient, NetworkFailure};
use crate::evaluation::domain::{BankChance, EvaluationPayload, EvaluationReport, EvaluationResult};
use crate::evaluation::form::FormState;

pub(super) fn case_form() -> FormState {
    FormState::from_pairs([
        "kunde_ID=K-1042",
        "laanetype_ønsket=Boliglån",
        "laan_oensket=3500000",
        "bolig_verdi=4000000",
        "egenkapital=500000",
        "egenkapital_kilde=Sparing",
        "studielaan=250000",
        "forbrukslaan=0",
        "kredittkort_ramme=50000",
        "billaan=120000",
        "banker_soekt= dnb , ,nordea ",
        "inntekt_hovedsoker=720000",
        "arbeidsstatus_hovedsoker=Fast ansatt",
        "har_medsoker=Nei",
        "barn_under_18=2",
    ])
    .expect("case form parses")
}

pub(super) fn co_applicant_form() -> FormState {
    let mut form = case_form();
    form.set("har_medsoker", "Ja");
    form.set("inntekt_medsoker", "540000");
    form.set("arbeidsstatus_medsoker", "Midlertidig");
    form
}

pub(super) fn report(risk_flags: &[&str], suggestions: &[&str], banks: &[(&str, f64)]) -> EvaluationReport {
    EvaluationReport {
        case_id: None,
        risk_flags: risk_flags.iter().map(|flag| flag.to_string()).collect(),
        suggestions: suggestions.iter().map(|item| item.to_string()).collect(),
        bank_chances: banks
            .iter()
            .map(|(name, chance)| BankChance {
                bank_name: name.to_string(),
                chance: *chance,
            })
            .collect(),
    }
}

/// Client double answering with a fixed result after an optional delay.
pub(super) struct ScriptedClient {
    pub(super) result: EvaluationResult,
    pub(super) delay: Duration,
    pub(super) calls: Arc<AtomicU32>,
}

impl ScriptedClient {
    pub(super) fn answering(result: EvaluationResult) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl EvaluationClient for ScriptedClient {
    async fn evaluate(&self, _payload: &EvaluationPayload) -> Result<EvaluationResult, NetworkFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.result.clone())
    }
}

/// Client double that sleeps according to the customer id, for racing submissions.
pub(super) struct ByCustomerClient;

impl EvaluationClient for ByCustomerClient {
    async fn evaluate(&self, payload: &EvaluationPayload) -> Result<EvaluationResult, NetworkFailure> {
        let customer = payload.customer_id().to_string();
        let delay = if customer == "slow" { 300 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(EvaluationResult::Success(EvaluationReport {
            case_id: Some(customer.clone()),
            risk_flags: vec![format!("flag for {customer}")],
            suggestions: Vec::new(),
            bank_chances: Vec::new(),
        }))
    }
}
