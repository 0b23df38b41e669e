use clap::Args;
use serde_json::Value;

use emi_core::schedule::amortization::{self, Granularity, ScheduleInput};

use super::calculate::LoanArgs;
use crate::input;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Aggregate the schedule by year instead of by month
    #[arg(long)]
    pub yearly: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput = if args.input.is_none() && !args.loan.is_empty() {
        ScheduleInput {
            loan: args.loan.to_input(),
            granularity: Granularity::Monthly,
        }
    } else if let Some(loaded) = input::load(args.input.as_deref())? {
        loaded
    } else {
        ScheduleInput {
            loan: args.loan.to_input(),
            granularity: Granularity::Monthly,
        }
    };
    if args.yearly {
        schedule_input.granularity = Granularity::Yearly;
    }

    let result = amortization::build_schedule(&schedule_input)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}
