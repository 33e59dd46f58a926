use super::common::*;
use crate::evaluation::domain::{ApplicantRole, EvaluationPayload};
use crate::evaluation::form::FormState;
use crate::evaluation::request::{build_legacy_request, build_payload, build_request, split_banks, PayloadFormat};
use serde_json::json;

#[test]
fn bank_list_is_trimmed_uppercased_and_compacted() {
    assert_eq!(split_banks(" dnb , ,nordea "), vec!["DNB", "NORDEA"]);
    assert!(split_banks("").is_empty());
    assert!(split_banks(" , ,").is_empty());
}

#[test]
fn bank_list_keeps_order_and_duplicates() {
    assert_eq!(
        split_banks("nordea,dnb,Nordea, sparebank 1"),
        vec!["NORDEA", "DNB", "NORDEA", "SPAREBANK 1"]
    );
}

#[test]
fn bank_list_is_idempotent() {
    let once = split_banks(" handelsbanken,, sbanken ,dnb");
    let twice = split_banks(&once.join(","));
    assert_eq!(once, twice);
    assert!(once.iter().all(|token| !token.is_empty()));
}

#[test]
fn single_applicant_without_selector() {
    let request = build_request(&case_form());

    assert_eq!(request.applicants.len(), 1);
    assert_eq!(request.applicants[0].role, ApplicantRole::Primary);
    assert_eq!(request.applicants[0].income, 720000.0);
    assert!(!request.has_co_applicant());
}

#[test]
fn co_applicant_follows_primary() {
    let request = build_request(&co_applicant_form());

    let roles: Vec<_> = request
        .applicants
        .iter()
        .map(|applicant| applicant.role.label())
        .collect();
    assert_eq!(roles, vec!["primary", "co-applicant"]);
    assert_eq!(request.applicants[1].income, 540000.0);
    assert_eq!(request.applicants[1].employment_status, "Midlertidig");
}

#[test]
fn request_carries_coerced_amounts() {
    let request = build_request(&case_form());

    assert_eq!(request.customer_id, "K-1042");
    assert_eq!(request.requested_loan_amount, 3_500_000.0);
    assert_eq!(request.property_value, 4_000_000.0);
    assert_eq!(request.debts.student_loan, 250_000.0);
    assert_eq!(request.debts.car_loan, 120_000.0);
    assert_eq!(request.banks_applied, vec!["DNB", "NORDEA"]);
    assert_eq!(request.children_under_18, Some(2));
}

#[test]
fn same_form_builds_same_payload() {
    let form = co_applicant_form();
    let first = serde_json::to_value(build_request(&form)).expect("serialises");
    let second = serde_json::to_value(build_request(&form)).expect("serialises");
    assert_eq!(first, second);
}

#[test]
fn canonical_wire_shape_uses_form_names() {
    let value = serde_json::to_value(build_request(&co_applicant_form())).expect("serialises");

    assert_eq!(value["kunde_ID"], "K-1042");
    assert_eq!(value["laan_oensket"], 3_500_000.0);
    assert_eq!(value["gjeld"]["kredittkort_ramme"], 50_000.0);
    assert_eq!(value["banker_soekt"], json!(["DNB", "NORDEA"]));
    assert_eq!(value["sokere"][0]["rolle"], "hovedsoker");
    assert_eq!(value["sokere"][1]["rolle"], "medsoker");
    assert_eq!(value["barn_under_18"], 2);
}

#[test]
fn unparseable_amounts_serialise_as_null() {
    let form = FormState::from_pairs(["kunde_ID=K-1", "laan_oensket=abc"]).expect("pairs parse");
    let value = serde_json::to_value(build_request(&form)).expect("serialises");

    assert!(value["laan_oensket"].is_null());
    assert!(value["barn_under_18"].is_null());
}

#[test]
fn legacy_payload_reads_flat_fields() {
    let form = FormState::from_pairs([
        "kunde_ID=K-9",
        "laanetype_ønsket=Refinansiering",
        "inntekt=600000",
        "total_gjeld=3500000",
        "laan_oensket=3500000",
        "bolig_verdi=4000000",
        "husholdning_størrelse=3",
        "utgifter=120000",
        "inntekt_mnd=50000",
        "anmerkning=True",
    ])
    .expect("pairs parse");

    let request = build_legacy_request(&form);
    assert_eq!(request.total_debt, 3_500_000.0);
    assert_eq!(request.household_size, Some(3));
    assert!(request.negative_credit_mark);

    let value = serde_json::to_value(build_payload(&form, PayloadFormat::Legacy)).expect("serialises");
    assert_eq!(value["husholdning_størrelse"], 3);
    assert_eq!(value["anmerkning"], true);
    assert!(value.get("sokere").is_none());
}

#[test]
fn payload_format_selects_shape() {
    let form = case_form();
    assert!(matches!(build_payload(&form, PayloadFormat::Canonical), EvaluationPayload::Canonical(_)));
    assert!(matches!(build_payload(&form, PayloadFormat::Legacy), EvaluationPayload::Legacy(_)));
    assert_eq!(PayloadFormat::from_label(" Legacy "), Some(PayloadFormat::Legacy));
    assert_eq!(PayloadFormat::from_label("v1"), None);
}
