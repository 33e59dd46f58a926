//! Stand-in evaluation service for demonstrations and local front-end work.
//!
//! It answers every well-formed submission with the same canned result and never scores
//! the case. Nothing in the client falls back to it; it has to be started and pointed at
//! explicitly.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use super::domain::{BankChance, EvaluationReport, EvaluationResult};

pub const EVALUATE_CASE_PATH: &str = "/api/evaluate_case";
pub const NO_INPUT_MESSAGE: &str = "No input data provided";

/// Canned result used by the demo stub.
pub fn demo_response() -> EvaluationResult {
    EvaluationResult::Success(EvaluationReport {
        case_id: None,
        risk_flags: vec![
            "For høy gjeldsgrad (5.83x) – over 5.0x inntekt".to_string(),
            "LTV over 85% (87.50%) – krever egenkapital".to_string(),
        ],
        suggestions: vec![
            "[Gjeldsgrad] Reduser total gjeld med 500 000 kr. (Mål: 3 000 000 kr)".to_string(),
            "[LTV] Kunden må stille med ekstra egenkapital på 500 000 kr. (Mål: 3 400 000 kr)"
                .to_string(),
        ],
        bank_chances: vec![
            BankChance {
                bank_name: "DNB".to_string(),
                chance: 45.0,
            },
            BankChance {
                bank_name: "Nordea".to_string(),
                chance: 75.0,
            },
            BankChance {
                bank_name: "SpareBank 1".to_string(),
                chance: 60.0,
            },
        ],
    })
}

/// Router exposing the evaluation endpoint and a health probe.
pub fn stub_router(response: EvaluationResult) -> Router {
    Router::new()
        .route(EVALUATE_CASE_PATH, post(evaluate_case_handler))
        .route("/health", get(healthcheck))
        .with_state(Arc::new(response))
}

pub(crate) async fn evaluate_case_handler(
    State(response): State<Arc<EvaluationResult>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let case = match payload {
        Ok(Json(Value::Object(case))) if !case.is_empty() => case,
        _ => {
            let failure = EvaluationResult::Failure {
                message: Some(NO_INPUT_MESSAGE.to_string()),
            };
            return (StatusCode::BAD_REQUEST, Json(failure)).into_response();
        }
    };

    let case_id = case
        .get("kunde_ID")
        .and_then(Value::as_str)
        .unwrap_or("N/A")
        .to_string();
    info!(%case_id, "answering with canned evaluation");

    let mut result = EvaluationResult::clone(&response);
    if let EvaluationResult::Success(report) = &mut result {
        report.case_id = Some(case_id);
    }

    (StatusCode::OK, Json(result)).into_response()
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
