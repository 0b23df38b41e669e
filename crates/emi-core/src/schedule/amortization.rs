use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::engine::validation::validate_input;
use crate::engine::{annuity_terms, compute};
use crate::error::EmiError;
use crate::types::*;
use crate::EmiResult;

/// Period length of the generated schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Monthly,
    Yearly,
}

/// Input for an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub loan: EmiInput,
    #[serde(default)]
    pub granularity: Granularity,
}

/// A single row of the schedule. Amounts are rounded to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// Month or year number, starting at 1
    pub period: u32,
    pub opening_balance: f64,
    pub installment: f64,
    pub interest: f64,
    pub principal_repaid: f64,
    pub closing_balance: f64,
    /// Share of the original principal repaid by the end of this period, in percent
    pub repaid_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub granularity: Granularity,
    pub monthly_emi: Money,
    pub periods: Vec<AmortizationPeriod>,
    pub total_interest: f64,
    pub total_principal: f64,
}

/// Unrounded monthly row used while building the schedule.
#[derive(Debug, Clone, Copy)]
struct MonthRow {
    opening: f64,
    interest: f64,
    principal: f64,
    closing: f64,
}

/// Build a reducing-balance repayment schedule for a loan.
///
/// Each month the interest is charged on the opening balance and the rest
/// of the unrounded installment retires principal. The last month repays
/// whatever balance remains so the loan closes at exactly zero.
pub fn build_schedule(input: &ScheduleInput) -> EmiResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = validate_input(&input.loan)?;
    if loan.annual_rate != input.loan.annual_rate {
        warnings.push(format!(
            "Annual rate {}% rounded to {}%",
            input.loan.annual_rate, loan.annual_rate
        ));
    }

    let terms = annuity_terms(&loan);
    if terms.growth - 1.0 == 0.0 {
        return Err(EmiError::DivisionByZero {
            context: "EMI growth factor".into(),
        });
    }

    let principal = loan.principal as f64;
    let months = monthly_rows(principal, terms.monthly_rate, terms.emi, terms.num_months);

    let total_interest: f64 = months.iter().map(|m| m.interest).sum();
    let total_principal: f64 = months.iter().map(|m| m.principal).sum();

    let periods = match input.granularity {
        Granularity::Monthly => months
            .iter()
            .enumerate()
            .map(|(i, m)| to_period(i as u32 + 1, m, principal))
            .collect(),
        Granularity::Yearly => months
            .chunks(12)
            .enumerate()
            .map(|(i, year)| to_period(i as u32 + 1, &fold_year(year), principal))
            .collect(),
    };

    let output = ScheduleOutput {
        granularity: input.granularity,
        monthly_emi: compute(&loan).monthly_emi,
        periods,
        total_interest: round2(total_interest),
        total_principal: round2(total_principal),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Reducing-balance amortization at constant EMI",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn monthly_rows(principal: f64, monthly_rate: f64, emi: f64, num_months: u32) -> Vec<MonthRow> {
    let mut rows = Vec::with_capacity(num_months as usize);
    let mut balance = principal;

    for month in 1..=num_months {
        let interest = balance * monthly_rate;
        let repaid = if month == num_months {
            balance
        } else {
            (emi - interest).min(balance)
        };
        let closing = balance - repaid;
        rows.push(MonthRow {
            opening: balance,
            interest,
            principal: repaid,
            closing,
        });
        balance = closing;
    }

    rows
}

fn fold_year(months: &[MonthRow]) -> MonthRow {
    let opening = months.first().map_or(0.0, |m| m.opening);
    let closing = months.last().map_or(0.0, |m| m.closing);
    MonthRow {
        opening,
        interest: months.iter().map(|m| m.interest).sum(),
        principal: months.iter().map(|m| m.principal).sum(),
        closing,
    }
}

fn to_period(period: u32, row: &MonthRow, principal: f64) -> AmortizationPeriod {
    AmortizationPeriod {
        period,
        opening_balance: round2(row.opening),
        installment: round2(row.interest + row.principal),
        interest: round2(row.interest),
        principal_repaid: round2(row.principal),
        closing_balance: round2(row.closing),
        repaid_pct: round2((principal - row.closing) / principal * 100.0),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_schedule(granularity: Granularity) -> ScheduleInput {
        ScheduleInput {
            loan: EmiInput {
                principal: 1_000_000,
                annual_rate: dec!(6.5),
                tenure_years: 5,
            },
            granularity,
        }
    }

    #[test]
    fn test_monthly_schedule_closes_at_zero() {
        let out = build_schedule(&reference_schedule(Granularity::Monthly)).unwrap();
        let s = &out.result;
        assert_eq!(s.periods.len(), 60);
        assert_eq!(s.periods.last().unwrap().closing_balance, 0.0);
        assert_eq!(s.periods.last().unwrap().repaid_pct, 100.0);
        assert!((s.total_principal - 1_000_000.0).abs() < 0.01);
    }

    #[test]
    fn test_first_month_interest() {
        let out = build_schedule(&reference_schedule(Granularity::Monthly)).unwrap();
        let first = &out.result.periods[0];
        // 1,000,000 * 6.5% / 12
        assert_eq!(first.interest, 5416.67);
        assert_eq!(first.opening_balance, 1_000_000.0);
        assert_eq!(first.installment, 19_566.15);
    }

    #[test]
    fn test_yearly_schedule_aggregates_months() {
        let monthly = build_schedule(&reference_schedule(Granularity::Monthly)).unwrap();
        let yearly = build_schedule(&reference_schedule(Granularity::Yearly)).unwrap();
        assert_eq!(yearly.result.periods.len(), 5);

        let first_year_interest: f64 = monthly.result.periods[..12].iter().map(|p| p.interest).sum();
        assert!((yearly.result.periods[0].interest - first_year_interest).abs() < 0.1);
        assert_eq!(yearly.result.periods[4].closing_balance, 0.0);
        assert!((yearly.result.total_interest - monthly.result.total_interest).abs() < 1e-9);
    }

    #[test]
    fn test_total_interest_matches_summary() {
        let out = build_schedule(&reference_schedule(Granularity::Yearly)).unwrap();
        // Summary ceils 173,968.89 to 173,969
        assert!((out.result.total_interest - 173_968.89).abs() < 0.02);
        assert_eq!(out.result.monthly_emi, 19_566);
    }

    #[test]
    fn test_invalid_tenure_error() {
        let mut input = reference_schedule(Granularity::Monthly);
        input.loan.tenure_years = 41;
        assert!(build_schedule(&input).is_err());
    }
}
