use serde::{Deserialize, Serialize};

/// Position of an applicant on the case. The primary applicant is always listed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicantRole {
    #[serde(rename = "hovedsoker")]
    Primary,
    #[serde(rename = "medsoker")]
    CoApplicant,
}

impl ApplicantRole {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantRole::Primary => "primary",
            ApplicantRole::CoApplicant => "co-applicant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(rename = "rolle")]
    pub role: ApplicantRole,
    #[serde(rename = "inntekt")]
    pub income: f64,
    #[serde(rename = "arbeidsstatus")]
    pub employment_status: String,
}

/// Outstanding debt broken down by category, in kroner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debts {
    #[serde(rename = "studielaan")]
    pub student_loan: f64,
    #[serde(rename = "forbrukslaan")]
    pub consumer_loan: f64,
    #[serde(rename = "kredittkort_ramme")]
    pub credit_card_limit: f64,
    #[serde(rename = "billaan")]
    pub car_loan: f64,
}

/// Canonical payload posted to the evaluation service.
///
/// Amounts that failed to coerce are carried as NaN and serialise as `null`; catching
/// them is the job of whatever validates the form before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(rename = "kunde_ID")]
    pub customer_id: String,
    #[serde(rename = "laanetype_ønsket")]
    pub loan_type_requested: String,
    #[serde(rename = "laan_oensket")]
    pub requested_loan_amount: f64,
    #[serde(rename = "bolig_verdi")]
    pub property_value: f64,
    #[serde(rename = "egenkapital")]
    pub equity: f64,
    #[serde(rename = "egenkapital_kilde")]
    pub equity_source: String,
    #[serde(rename = "gjeld")]
    pub debts: Debts,
    #[serde(rename = "banker_soekt")]
    pub banks_applied: Vec<String>,
    #[serde(rename = "sokere")]
    pub applicants: Vec<Applicant>,
    #[serde(rename = "barn_under_18")]
    pub children_under_18: Option<i64>,
}

impl EvaluationRequest {
    pub fn has_co_applicant(&self) -> bool {
        self.applicants
            .iter()
            .any(|applicant| applicant.role == ApplicantRole::CoApplicant)
    }
}

/// Flat single-applicant payload understood by earlier deployments of the evaluation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEvaluationRequest {
    #[serde(rename = "kunde_ID")]
    pub customer_id: String,
    #[serde(rename = "laanetype_ønsket")]
    pub loan_type_requested: String,
    #[serde(rename = "inntekt")]
    pub income: f64,
    #[serde(rename = "total_gjeld")]
    pub total_debt: f64,
    #[serde(rename = "laan_oensket")]
    pub requested_loan_amount: f64,
    #[serde(rename = "bolig_verdi")]
    pub property_value: f64,
    #[serde(rename = "husholdning_størrelse")]
    pub household_size: Option<i64>,
    #[serde(rename = "utgifter")]
    pub expenses: f64,
    #[serde(rename = "inntekt_mnd")]
    pub monthly_income: Option<i64>,
    #[serde(rename = "anmerkning")]
    pub negative_credit_mark: bool,
}

/// Body of a submission in whichever shape the deployment expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvaluationPayload {
    Canonical(EvaluationRequest),
    Legacy(LegacyEvaluationRequest),
}

impl EvaluationPayload {
    pub fn customer_id(&self) -> &str {
        match self {
            EvaluationPayload::Canonical(request) => &request.customer_id,
            EvaluationPayload::Legacy(request) => &request.customer_id,
        }
    }
}

/// Estimated approval likelihood at one bank, as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankChance {
    #[serde(rename = "navn", alias = "name")]
    pub bank_name: String,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationReport {
    pub case_id: Option<String>,
    pub risk_flags: Vec<String>,
    pub suggestions: Vec<String>,
    pub bank_chances: Vec<BankChance>,
}

/// Response from the evaluation service, discriminated on the `success` flag.
///
/// A `Failure` is a normal answer from a reachable service and is rendered, not raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireEvaluationResult", into = "WireEvaluationResult")]
pub enum EvaluationResult {
    Success(EvaluationReport),
    Failure { message: Option<String> },
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationResult::Success(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEvaluationResult {
    success: bool,
    #[serde(rename = "case_ID", default, skip_serializing_if = "Option::is_none")]
    case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    risk_flags: Vec<String>,
    #[serde(
        rename = "løsningsforslag",
        alias = "suggestions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bank_chances: Vec<BankChance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<WireEvaluationResult> for EvaluationResult {
    fn from(wire: WireEvaluationResult) -> Self {
        if wire.success {
            EvaluationResult::Success(EvaluationReport {
                case_id: wire.case_id,
                risk_flags: wire.risk_flags,
                suggestions: wire.suggestions,
                bank_chances: wire.bank_chances,
            })
        } else {
            EvaluationResult::Failure {
                message: wire.message,
            }
        }
    }
}

impl From<EvaluationResult> for WireEvaluationResult {
    fn from(result: EvaluationResult) -> Self {
        match result {
            EvaluationResult::Success(report) => WireEvaluationResult {
                success: true,
                case_id: report.case_id,
                risk_flags: report.risk_flags,
                suggestions: report.suggestions,
                bank_chances: report.bank_chances,
                message: None,
            },
            EvaluationResult::Failure { message } => WireEvaluationResult {
                success: false,
                case_id: None,
                risk_flags: Vec::new(),
                suggestions: Vec::new(),
                bank_chances: Vec::new(),
                message,
            },
        }
    }
}
