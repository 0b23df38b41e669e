use emi_core::engine::compute;
use emi_core::session::{InputField, SessionEdit};
use emi_core::EmiSession;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Reject-and-retain gates
// ===========================================================================

#[test]
fn test_principal_gate_boundaries() {
    let mut session = EmiSession::new();

    assert!(!session.accept_principal(99_999));
    assert_eq!(session.principal(), 1_000_000);

    assert!(!session.accept_principal(100_000_000));
    assert_eq!(session.principal(), 1_000_000);

    assert!(session.accept_principal(100_000));
    assert_eq!(session.principal(), 100_000);

    assert!(session.accept_principal(99_999_999));
    assert_eq!(session.principal(), 99_999_999);
}

#[test]
fn test_rate_gate_boundaries() {
    let mut session = EmiSession::new();

    assert!(!session.accept_rate(dec!(0.5)));
    assert!(!session.accept_rate(dec!(45.1)));
    assert_eq!(session.annual_rate(), dec!(6.5));

    assert!(session.accept_rate(dec!(1)));
    assert_eq!(session.annual_rate(), dec!(1));

    assert!(session.accept_rate(dec!(45)));
    assert_eq!(session.annual_rate(), dec!(45));

    assert!(session.accept_rate(dec!(6.567)));
    assert_eq!(session.annual_rate(), dec!(6.57));
}

#[test]
fn test_typed_rate_rounds_like_a_parsed_float() {
    // "2.675" parses to 2.67499999... in binary64, so it is stored as 2.67
    let mut session = EmiSession::new();
    assert!(session.accept_rate_text("2.675"));
    assert_eq!(session.annual_rate(), dec!(2.67));
    assert_eq!(session.monthly_emi(), 17_822);
    assert_eq!(session.total_amount(), 1_069_346);
    assert_eq!(session.total_interest(), 69_346);

    assert!(session.accept_rate_text("1.005"));
    assert_eq!(session.annual_rate(), dec!(1.00));
}

#[test]
fn test_tenure_gate_boundaries() {
    let mut session = EmiSession::new();

    assert!(!session.accept_tenure(0));
    assert!(!session.accept_tenure(41));
    assert_eq!(session.tenure_years(), 5);

    assert!(session.accept_tenure(1));
    assert_eq!(session.tenure_years(), 1);

    assert!(session.accept_tenure(40));
    assert_eq!(session.tenure_years(), 40);
}

#[test]
fn test_rejected_tenure_leaves_derived_outputs() {
    let mut session = EmiSession::new();
    let (emi, interest, total) = (
        session.monthly_emi(),
        session.total_interest(),
        session.total_amount(),
    );

    session.accept_tenure(41);

    assert_eq!(session.monthly_emi(), emi);
    assert_eq!(session.total_interest(), interest);
    assert_eq!(session.total_amount(), total);
    assert_eq!((emi, interest, total), (19_566, 173_969, 1_173_969));
}

#[test]
fn test_outputs_always_match_inputs() {
    let mut session = EmiSession::new();
    session.accept_principal(2_500_000);
    session.accept_rate(dec!(8.75));
    session.accept_tenure(50);
    session.accept_tenure(20);
    session.accept_principal(12_345);

    assert_eq!(*session.summary(), compute(session.input()));
    assert_eq!(session.monthly_emi(), 22_092);
    assert_eq!(session.total_amount(), 5_302_265);
    assert_eq!(session.total_interest(), 2_802_265);
}

// ===========================================================================
// Replay
// ===========================================================================

#[test]
fn test_replay_from_json_edits() {
    let edits: Vec<SessionEdit> = serde_json::from_str(
        r#"[
            {"field": "principal", "value": "99999"},
            {"field": "principal", "value": "2500000"},
            {"field": "rate", "value": "8.75"},
            {"field": "tenure", "value": "20"}
        ]"#,
    )
    .unwrap();

    let mut session = EmiSession::new();
    let steps = session.replay(&edits);

    let accepted: Vec<bool> = steps.iter().map(|s| s.accepted).collect();
    assert_eq!(accepted, vec![false, true, true, true]);
    assert_eq!(steps[0].state, EmiSession::new().state());
    assert_eq!(steps[0].field, InputField::Principal);
    assert_eq!(steps[3].state.monthly_emi, 22_092);
}

#[test]
fn test_state_serializes_rate_as_string() {
    let session = EmiSession::new();
    let json = serde_json::to_value(session.state()).unwrap();
    assert_eq!(json["monthly_emi"], 19_566);
    assert_eq!(json["annual_rate"], "6.5");
}
