use clap::Args;
use serde_json::{json, Value};

use emi_core::session::{InputField, SessionEdit};
use emi_core::EmiSession;

use super::calculate::LoanArgs;
use crate::input;

/// Arguments for replaying typed edits against a calculator session
#[derive(Args)]
pub struct SessionArgs {
    /// Starting loan terms (defaults to 1,000,000 at 6.5% over 5 years)
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Edit to apply, as field=value (field is principal, rate or tenure). Repeatable.
    #[arg(long = "edit", value_parser = parse_edit)]
    pub edits: Vec<SessionEdit>,

    /// Path to a JSON array of {"field", "value"} edits
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_edit(raw: &str) -> Result<SessionEdit, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    let field = match field.trim() {
        "principal" => InputField::Principal,
        "rate" => InputField::Rate,
        "tenure" => InputField::Tenure,
        other => return Err(format!("unknown field '{other}' (expected principal, rate or tenure)")),
    };
    Ok(SessionEdit {
        field,
        value: value.to_string(),
    })
}

pub fn run_session(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let edits: Vec<SessionEdit> = if !args.edits.is_empty() {
        args.edits
    } else if let Some(loaded) = input::load(args.input.as_deref())? {
        loaded
    } else {
        return Err("--edit field=value or --input <edits.json> (or stdin) required for session replay".into());
    };

    let start = args.loan.to_input();
    let mut session = EmiSession::with_inputs(start.principal, start.annual_rate, start.tenure_years)?;
    let initial = session.state();

    let steps = session.replay(&edits);
    let rejected = steps.iter().filter(|s| !s.accepted).count();
    tracing::info!(edits = steps.len(), rejected, "replayed session");

    let rows: Vec<Value> = steps
        .iter()
        .map(|s| {
            json!({
                "step": s.step,
                "field": s.field,
                "value": s.value,
                "accepted": s.accepted,
                "principal": s.state.principal,
                "annual_rate": s.state.annual_rate,
                "tenure_years": s.state.tenure_years,
                "monthly_emi": s.state.monthly_emi,
                "total_interest": s.state.total_interest,
                "total_amount": s.state.total_amount,
            })
        })
        .collect();

    Ok(json!({
        "initial": initial,
        "results": rows,
        "final": session.state(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edit() {
        let edit = parse_edit("tenure=41").unwrap();
        assert_eq!(edit.field, InputField::Tenure);
        assert_eq!(edit.value, "41");
        assert!(parse_edit("tenure").is_err());
        assert!(parse_edit("years=5").is_err());
    }

    #[test]
    fn test_run_session_with_flags() {
        let args = SessionArgs {
            loan: LoanArgs::default(),
            edits: vec![parse_edit("tenure=41").unwrap(), parse_edit("rate=6.567").unwrap()],
            input: None,
        };
        let out = run_session(args).unwrap();
        assert_eq!(out["results"][0]["accepted"], false);
        assert_eq!(out["results"][0]["monthly_emi"], 19_566);
        assert_eq!(out["results"][1]["accepted"], true);
        assert_eq!(out["final"]["annual_rate"], "6.57");
    }
}
