//! End-to-end scenarios for the evaluation pipeline, driven through the public API against
//! a mocked evaluation service.

use loan_advisor::config::EvaluationClientConfig;
use loan_advisor::evaluation::render::{CHECK_SERVER, RISK_FLAGS_HEADING};
use loan_advisor::evaluation::{
    evaluate_and_render, FormState, HttpEvaluationClient, MemoryTargets, PayloadFormat,
    RenderState, ResultRenderer,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submitted_form() -> FormState {
    FormState::from_json(
        &json!({
            "kunde_ID": "K-2001",
            "laanetype_ønsket": "Boliglån",
            "laan_oensket": "3500000",
            "bolig_verdi": "4000000",
            "egenkapital": "500000",
            "egenkapital_kilde": "Arv",
            "studielaan": "180000",
            "forbrukslaan": "0",
            "kredittkort_ramme": "40000",
            "billaan": "0",
            "banker_soekt": "dnb, nordea",
            "inntekt_hovedsoker": "650000",
            "arbeidsstatus_hovedsoker": "Fast ansatt",
            "har_medsoker": "Ja",
            "inntekt_medsoker": "480000",
            "arbeidsstatus_medsoker": "Fast ansatt",
            "barn_under_18": "1"
        })
        .to_string(),
    )
    .expect("form snapshot parses")
}

fn client(endpoint: &str) -> HttpEvaluationClient {
    let endpoint = Url::parse(endpoint).expect("valid endpoint");
    HttpEvaluationClient::new(&EvaluationClientConfig::new(endpoint)).expect("client builds")
}

#[tokio::test]
async fn mocked_service_response_renders_flags_suggestions_and_cards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/evaluate_case"))
        .and(body_partial_json(json!({
            "laan_oensket": 3500000.0,
            "bolig_verdi": 4000000.0,
            "sokere": [{ "rolle": "hovedsoker" }, { "rolle": "medsoker", "inntekt": 480000.0 }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "risk_flags": ["LTV over 85%"],
            "løsningsforslag": ["Reduce debt"],
            "bank_chances": [
                { "navn": "DNB", "chance": 45 },
                { "navn": "Nordea", "chance": 75 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&format!("{}/api/evaluate_case", server.uri()));
    let mut renderer = ResultRenderer::new(MemoryTargets::default());

    let state =
        evaluate_and_render(&client, &submitted_form(), PayloadFormat::Canonical, &mut renderer)
            .await;

    assert_eq!(state, RenderState::Success);
    let targets = renderer.into_targets();
    assert!(targets.content_visible);
    assert!(!targets.loading_visible);
    assert_eq!(targets.risk_flags.heading.as_deref(), Some(RISK_FLAGS_HEADING));
    assert_eq!(targets.risk_flags.lines.len(), 1);
    assert_eq!(targets.risk_flags.lines[0].text, "LTV over 85%");
    assert_eq!(targets.suggestions.len(), 1);
    assert_eq!(targets.bank_cards.len(), 2);
    assert_eq!(targets.bank_cards[0].bank_name, "DNB");
    assert!(!targets.bank_cards[0].high_chance);
    assert_eq!(targets.bank_cards[1].bank_name, "Nordea");
    assert!(targets.bank_cards[1].high_chance);
}

#[tokio::test]
async fn unreachable_service_renders_connectivity_error() {
    let client = client("http://127.0.0.1:1/api/evaluate_case");
    let mut renderer = ResultRenderer::new(MemoryTargets::default());

    let state =
        evaluate_and_render(&client, &submitted_form(), PayloadFormat::Canonical, &mut renderer)
            .await;

    assert_eq!(state, RenderState::Failure);
    let targets = renderer.into_targets();
    assert!(!targets.loading_visible);
    assert!(targets.content_visible);
    assert!(targets.risk_flags.lines[0]
        .text
        .starts_with("Nettverksfeil: Kunne ikke koble til API"));
    assert_eq!(targets.suggestions[0].text, CHECK_SERVER);
    assert!(targets.bank_cards.is_empty());
}

#[tokio::test]
async fn form_stays_usable_after_a_failed_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "risk_flags": [],
            "løsningsforslag": []
        })))
        .mount(&server)
        .await;

    let mut renderer = ResultRenderer::new(MemoryTargets::default());
    let form = submitted_form();

    let offline = client("http://127.0.0.1:1/api/evaluate_case");
    let first = evaluate_and_render(&offline, &form, PayloadFormat::Canonical, &mut renderer).await;
    assert_eq!(first, RenderState::Failure);

    let online = client(&format!("{}/api/evaluate_case", server.uri()));
    let second = evaluate_and_render(&online, &form, PayloadFormat::Canonical, &mut renderer).await;
    assert_eq!(second, RenderState::Success);
    assert!(renderer.targets().bank_cards.is_empty());
    assert_eq!(renderer.targets().risk_flags.lines.len(), 1);
}
