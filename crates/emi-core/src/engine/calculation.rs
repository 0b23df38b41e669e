use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::validation::{percent_as_f64, validate_input, PRINCIPAL_SLIDER_MAX, PRINCIPAL_SLIDER_MIN};
use crate::error::EmiError;
use crate::types::{with_metadata, ComputationOutput, EmiInput, Money, Rate, Years};
use crate::EmiResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Intermediate annuity quantities, all in binary64.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnuityTerms {
    /// Annual percentage / 12 / 100
    pub monthly_rate: f64,
    pub num_months: u32,
    /// (1 + monthly_rate) ^ num_months
    pub growth: f64,
    /// Unrounded installment
    pub emi: f64,
}

/// The three derived quantities shown to a borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiBreakdown {
    /// Installment, floored to whole units
    pub monthly_emi: Money,
    /// Interest over the whole tenure, ceiled
    pub total_interest: Money,
    /// Principal plus interest, ceiled
    pub total_amount: Money,
}

/// Output of a one-shot EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub principal: Money,
    /// Rate as stored after rounding to two decimals
    pub annual_rate: Rate,
    pub tenure_years: Years,
    pub monthly_rate: f64,
    pub num_months: u32,
    /// Installment before flooring
    pub exact_emi: f64,
}

/// Compute the annuity terms for an input that has already passed the gates.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate and
/// n the number of months. Operations run in this exact order so results
/// match any other binary64 evaluation of the same expression.
pub fn annuity_terms(input: &EmiInput) -> AnnuityTerms {
    let monthly_rate = percent_as_f64(input.annual_rate) / 12.0 / 100.0;
    let num_months = input.tenure_years * MONTHS_PER_YEAR;
    let growth = (1.0 + monthly_rate).powf(f64::from(num_months));
    let emi = input.principal as f64 * monthly_rate * growth / (growth - 1.0);

    AnnuityTerms {
        monthly_rate,
        num_months,
        growth,
        emi,
    }
}

/// Recompute all three derived quantities from an accepted input triple.
///
/// Callers must only pass inputs that satisfy the validation gates; a rate
/// of at least 1% keeps `growth - 1` away from zero.
pub fn compute(input: &EmiInput) -> EmiBreakdown {
    breakdown(&annuity_terms(input), input.principal)
}

/// One-shot EMI calculation for untrusted input.
///
/// Unlike the session gates, an out-of-range input here is an error: there
/// is no previous value to fall back on.
pub fn calculate_emi(input: &EmiInput) -> EmiResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let validated = validate_input(input)?;

    if validated.annual_rate != input.annual_rate {
        warnings.push(format!(
            "Annual rate {}% rounded to {}%",
            input.annual_rate, validated.annual_rate
        ));
    }
    if !(PRINCIPAL_SLIDER_MIN..=PRINCIPAL_SLIDER_MAX).contains(&validated.principal) {
        warnings.push(format!(
            "Principal {} is outside the slider range {PRINCIPAL_SLIDER_MIN}-{PRINCIPAL_SLIDER_MAX}",
            validated.principal
        ));
    }

    let terms = annuity_terms(&validated);
    if terms.growth - 1.0 == 0.0 {
        return Err(EmiError::DivisionByZero {
            context: "EMI growth factor".into(),
        });
    }
    let derived = breakdown(&terms, validated.principal);

    tracing::debug!(
        principal = validated.principal,
        annual_rate = %validated.annual_rate,
        tenure_years = validated.tenure_years,
        monthly_emi = derived.monthly_emi,
        "calculated EMI"
    );

    let output = EmiOutput {
        monthly_emi: derived.monthly_emi,
        total_interest: derived.total_interest,
        total_amount: derived.total_amount,
        principal: validated.principal,
        annual_rate: validated.annual_rate,
        tenure_years: validated.tenure_years,
        monthly_rate: terms.monthly_rate,
        num_months: terms.num_months,
        exact_emi: terms.emi,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Reducing-balance EMI: P*r*(1+r)^n / ((1+r)^n - 1), EMI floored, totals ceiled",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn breakdown(terms: &AnnuityTerms, principal: Money) -> EmiBreakdown {
    let total_amount = terms.emi * f64::from(terms.num_months);
    let total_interest = total_amount - principal as f64;

    EmiBreakdown {
        monthly_emi: terms.emi.floor() as Money,
        total_interest: total_interest.ceil() as Money,
        total_amount: total_amount.ceil() as Money,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_loan() -> EmiInput {
        EmiInput {
            principal: 1_000_000,
            annual_rate: dec!(6.5),
            tenure_years: 5,
        }
    }

    #[test]
    fn test_reference_loan_terms() {
        let terms = annuity_terms(&reference_loan());
        assert_eq!(terms.num_months, 60);
        assert!((terms.monthly_rate - 0.005_416_666_666_666_667).abs() < 1e-15);
        assert!((terms.emi - 19_566.148_218_728_67).abs() < 1e-6);
    }

    #[test]
    fn test_reference_loan_breakdown() {
        let derived = compute(&reference_loan());
        assert_eq!(derived.monthly_emi, 19_566);
        assert_eq!(derived.total_amount, 1_173_969);
        assert_eq!(derived.total_interest, 173_969);
    }

    #[test]
    fn test_calculate_emi_envelope() {
        let out = calculate_emi(&reference_loan()).unwrap();
        assert_eq!(out.result.monthly_emi, 19_566);
        assert_eq!(out.result.num_months, 60);
        assert!(out.warnings.is_empty());
        assert!(out.methodology.contains("EMI"));
    }

    #[test]
    fn test_calculate_emi_warns_outside_slider_range() {
        let input = EmiInput {
            principal: 50_000_000,
            ..reference_loan()
        };
        let out = calculate_emi(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("slider"));
    }

    #[test]
    fn test_calculate_emi_rejects_zero_rate() {
        let input = EmiInput {
            annual_rate: dec!(0),
            ..reference_loan()
        };
        assert!(matches!(
            calculate_emi(&input),
            Err(EmiError::InvalidInput { .. })
        ));
    }
}
