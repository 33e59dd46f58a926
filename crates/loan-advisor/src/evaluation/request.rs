use super::domain::{
    Applicant, ApplicantRole, Debts, EvaluationPayload, EvaluationRequest,
    LegacyEvaluationRequest,
};
use super::form::{fields, FormState, TRUE_LITERAL};

/// Payload shape the configured evaluation service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadFormat {
    /// Applicant list, debt breakdown, and applied banks.
    #[default]
    Canonical,
    /// Flat single-applicant shape with aggregate income and debt.
    Legacy,
}

impl PayloadFormat {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "canonical" => Some(Self::Canonical),
            "legacy" => Some(Self::Legacy),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PayloadFormat::Canonical => "canonical",
            PayloadFormat::Legacy => "legacy",
        }
    }
}

/// Splits the comma-separated bank list into uppercase tokens.
///
/// Tokens are trimmed, uppercased, and empties dropped, in that order. Input order is
/// kept and duplicates survive.
pub fn split_banks(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .map(str::to_uppercase)
        .filter(|token| !token.is_empty())
        .collect()
}

pub fn build_request(form: &FormState) -> EvaluationRequest {
    let mut applicants = vec![Applicant {
        role: ApplicantRole::Primary,
        income: form.decimal(fields::PRIMARY_INCOME),
        employment_status: form.text(fields::PRIMARY_EMPLOYMENT),
    }];

    if form.has_co_applicant() {
        applicants.push(Applicant {
            role: ApplicantRole::CoApplicant,
            income: form.decimal(fields::CO_APPLICANT_INCOME),
            employment_status: form.text(fields::CO_APPLICANT_EMPLOYMENT),
        });
    }

    EvaluationRequest {
        customer_id: form.text(fields::CUSTOMER_ID),
        loan_type_requested: form.text(fields::LOAN_TYPE),
        requested_loan_amount: form.decimal(fields::REQUESTED_LOAN),
        property_value: form.decimal(fields::PROPERTY_VALUE),
        equity: form.decimal(fields::EQUITY),
        equity_source: form.text(fields::EQUITY_SOURCE),
        debts: Debts {
            student_loan: form.decimal(fields::STUDENT_LOAN),
            consumer_loan: form.decimal(fields::CONSUMER_LOAN),
            credit_card_limit: form.decimal(fields::CREDIT_CARD_LIMIT),
            car_loan: form.decimal(fields::CAR_LOAN),
        },
        banks_applied: split_banks(&form.text(fields::BANKS_APPLIED)),
        applicants,
        children_under_18: form.integer(fields::CHILDREN_UNDER_18),
    }
}

pub fn build_legacy_request(form: &FormState) -> LegacyEvaluationRequest {
    LegacyEvaluationRequest {
        customer_id: form.text(fields::CUSTOMER_ID),
        loan_type_requested: form.text(fields::LOAN_TYPE),
        income: form.decimal(fields::INCOME),
        total_debt: form.decimal(fields::TOTAL_DEBT),
        requested_loan_amount: form.decimal(fields::REQUESTED_LOAN),
        property_value: form.decimal(fields::PROPERTY_VALUE),
        household_size: form.integer(fields::HOUSEHOLD_SIZE),
        expenses: form.decimal(fields::EXPENSES),
        monthly_income: form.integer(fields::MONTHLY_INCOME),
        negative_credit_mark: form.flag(fields::CREDIT_REMARK, TRUE_LITERAL),
    }
}

pub fn build_payload(form: &FormState, format: PayloadFormat) -> EvaluationPayload {
    match format {
        PayloadFormat::Canonical => EvaluationPayload::Canonical(build_request(form)),
        PayloadFormat::Legacy => EvaluationPayload::Legacy(build_legacy_request(form)),
    }
}
