use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole currency units. The engine never deals in fractional principal.
pub type Money = u64;

/// Annual interest rate as a percentage (6.5 = 6.5% p.a.), held to two decimals.
pub type Rate = Decimal;

/// Loan tenure in whole years
pub type Years = u32;

/// The three user-facing inputs of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiInput {
    /// Borrowed amount
    pub principal: Money,
    /// Nominal annual rate in percent
    pub annual_rate: Rate,
    /// Duration in years
    pub tenure_years: Years,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "ieee754_binary64".to_string(),
        },
    }
}
