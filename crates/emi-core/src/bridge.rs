//! JSON-string entry points for foreign callers such as the Node binding.
//! Each takes a JSON document and returns the serialized output envelope.

use crate::engine::calculate_emi;
use crate::session::SessionEdit;
use crate::types::EmiInput;
use crate::{EmiResult, EmiSession};

pub fn calculate_emi_json(input_json: &str) -> EmiResult<String> {
    let input: EmiInput = serde_json::from_str(input_json)?;
    let output = calculate_emi(&input)?;
    Ok(serde_json::to_string(&output)?)
}

#[cfg(feature = "schedule")]
pub fn build_schedule_json(input_json: &str) -> EmiResult<String> {
    use crate::schedule::amortization::{build_schedule, ScheduleInput};

    let input: ScheduleInput = serde_json::from_str(input_json)?;
    let output = build_schedule(&input)?;
    Ok(serde_json::to_string(&output)?)
}

/// Replays a JSON array of `{"field", "value"}` edits against a fresh session.
pub fn replay_session_json(edits_json: &str) -> EmiResult<String> {
    let edits: Vec<SessionEdit> = serde_json::from_str(edits_json)?;
    let steps = EmiSession::new().replay(&edits);
    Ok(serde_json::to_string(&steps)?)
}

/// Current state of a session as JSON.
pub fn session_state_json(session: &EmiSession) -> EmiResult<String> {
    Ok(serde_json::to_string(&session.state())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmiError;
    use serde_json::Value;

    #[test]
    fn test_calculate_emi_json() {
        let out = calculate_emi_json(r#"{"principal": 1000000, "annual_rate": 6.5, "tenure_years": 5}"#).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["result"]["monthly_emi"], 19_566);
        assert_eq!(v["result"]["total_amount"], 1_173_969);
        assert_eq!(v["result"]["total_interest"], 173_969);
    }

    #[test]
    fn test_calculate_emi_json_errors() {
        assert!(matches!(
            calculate_emi_json("{"),
            Err(EmiError::SerializationError(_))
        ));
        assert!(matches!(
            calculate_emi_json(r#"{"principal": 1000000, "annual_rate": 6.5, "tenure_years": 41}"#),
            Err(EmiError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_replay_session_json() {
        let out = replay_session_json(
            r#"[{"field": "tenure", "value": "41"}, {"field": "rate", "value": "2.675"}]"#,
        )
        .unwrap();
        let steps: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(steps[0]["accepted"], false);
        assert_eq!(steps[0]["state"]["monthly_emi"], 19_566);
        assert_eq!(steps[1]["accepted"], true);
        assert_eq!(steps[1]["state"]["annual_rate"], "2.67");
        assert_eq!(steps[1]["state"]["monthly_emi"], 17_822);
    }

    #[test]
    fn test_replay_session_json_rejects_unknown_field() {
        assert!(replay_session_json(r#"[{"field": "years", "value": "5"}]"#).is_err());
    }

    #[cfg(feature = "schedule")]
    #[test]
    fn test_build_schedule_json_yearly() {
        let out = build_schedule_json(
            r#"{"principal": 1000000, "annual_rate": "6.5", "tenure_years": 5, "granularity": "yearly"}"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["result"]["periods"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_session_state_json() {
        let v: Value = serde_json::from_str(&session_state_json(&EmiSession::new()).unwrap()).unwrap();
        assert_eq!(v["principal"], 1_000_000);
        assert_eq!(v["annual_rate"], "6.5");
    }
}
