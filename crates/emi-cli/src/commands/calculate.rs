use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::engine::calculate_emi;
use emi_core::session::{DEFAULT_ANNUAL_RATE, DEFAULT_PRINCIPAL, DEFAULT_TENURE_YEARS};
use emi_core::EmiInput;

use crate::input;

/// Loan terms given as flags. Omitted flags fall back to 1,000,000 at 6.5% over 5 years.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Loan principal in whole currency units (6 to 8 digits)
    #[arg(long)]
    pub principal: Option<u64>,

    /// Annual interest rate in percent (e.g. 6.5 for 6.5%), between 1 and 45
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in years, between 1 and 40
    #[arg(long)]
    pub tenure: Option<u32>,
}

impl LoanArgs {
    pub fn is_empty(&self) -> bool {
        self.principal.is_none() && self.rate.is_none() && self.tenure.is_none()
    }

    pub fn to_input(&self) -> EmiInput {
        EmiInput {
            principal: self.principal.unwrap_or(DEFAULT_PRINCIPAL),
            annual_rate: self.rate.unwrap_or(DEFAULT_ANNUAL_RATE),
            tenure_years: self.tenure.unwrap_or(DEFAULT_TENURE_YEARS),
        }
    }
}

/// Arguments for a one-shot EMI calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve loan terms: `--input` file, then flags, then piped stdin, then defaults.
pub fn resolve_loan(loan: &LoanArgs, path: Option<&str>) -> Result<EmiInput, Box<dyn std::error::Error>> {
    if path.is_none() && !loan.is_empty() {
        return Ok(loan.to_input());
    }
    Ok(input::load(path)?.unwrap_or_else(|| loan.to_input()))
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input = resolve_loan(&args.loan, args.input.as_deref())?;
    let result = calculate_emi(&emi_input)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}
