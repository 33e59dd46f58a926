//! Submission pipeline for a loan case: the form is read and coerced, shaped into the
//! evaluation payload, posted to the external evaluation service, and the outcome is
//! rendered into the page's display regions.
//!
//! The evaluation rules themselves live behind the remote endpoint; nothing here scores
//! a case.

pub mod client;
pub mod domain;
pub mod form;
pub mod render;
pub mod request;
pub mod retry;
pub mod session;
pub mod stub;

#[cfg(test)]
mod tests;

pub use client::{EvaluationClient, HttpEvaluationClient, NetworkFailure};
pub use domain::{
    Applicant, ApplicantRole, BankChance, Debts, EvaluationPayload, EvaluationReport,
    EvaluationRequest, EvaluationResult, LegacyEvaluationRequest,
};
pub use form::{FieldState, FormError, FormState};
pub use render::{
    BankCard, MemoryTargets, MessageLine, RenderState, RenderTargets, ResultRenderer,
    RiskFlagsView, Tone,
};
pub use request::{build_legacy_request, build_payload, build_request, split_banks, PayloadFormat};
pub use retry::RetryPolicy;
pub use session::{evaluate_and_render, EvaluationSession};
pub use stub::{demo_response, stub_router};
