use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::EmiError;
use crate::types::{EmiInput, Money, Rate, Years};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Fewest decimal digits a directly entered principal may have (100,000).
pub const PRINCIPAL_MIN_DIGITS: u32 = 6;
/// Most decimal digits a directly entered principal may have (99,999,999).
pub const PRINCIPAL_MAX_DIGITS: u32 = 8;

pub const PRINCIPAL_SLIDER_MIN: Money = 100_000;
pub const PRINCIPAL_SLIDER_MAX: Money = 10_000_000;
pub const PRINCIPAL_SLIDER_STEP: Money = 10_000;

pub const RATE_MIN: Rate = dec!(1);
pub const RATE_MAX: Rate = dec!(45);
pub const RATE_SLIDER_STEP: Rate = dec!(0.1);
/// Accepted rates are stored with exactly this many decimal places.
pub const RATE_DECIMAL_PLACES: u32 = 2;

pub const TENURE_MIN: Years = 1;
pub const TENURE_MAX: Years = 40;
pub const TENURE_SLIDER_STEP: Years = 1;

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// Number of decimal digits in `value` (zero has one digit).
pub fn digit_count(value: Money) -> u32 {
    value.checked_ilog10().map_or(1, |d| d + 1)
}

/// A principal passes when its decimal representation has 6 to 8 digits.
///
/// This is a digit-count gate, not a magnitude gate: 99,999,999 passes even
/// though the slider tops out at 10,000,000.
pub fn is_valid_principal(candidate: Money) -> bool {
    (PRINCIPAL_MIN_DIGITS..=PRINCIPAL_MAX_DIGITS).contains(&digit_count(candidate))
}

/// Returns the rate as it would be stored, or `None` when it falls outside
/// `[RATE_MIN, RATE_MAX]`.
///
/// The range check runs on the raw candidate, before rounding, so anything
/// above 45 is refused even if it would round down to 45.00.
///
/// Rounding applies to the nearest binary64 value of the candidate, not to
/// its decimal text: "2.675" is stored below the midpoint in binary and
/// becomes 2.67, while an exactly representable 7.125 becomes 7.13.
pub fn normalize_rate(candidate: Decimal) -> Option<Rate> {
    if candidate < RATE_MIN || candidate > RATE_MAX {
        return None;
    }
    let binary = Decimal::from_f64_retain(percent_as_f64(candidate))?;
    Some(binary.round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
}

/// Nearest binary64 to a decimal percentage, identical to parsing its literal.
pub(crate) fn percent_as_f64(rate: Decimal) -> f64 {
    f64::from_str(&rate.to_string()).unwrap_or_else(|_| rate.to_f64().unwrap_or(f64::NAN))
}

pub fn is_valid_tenure(candidate: Years) -> bool {
    (TENURE_MIN..=TENURE_MAX).contains(&candidate)
}

// ---------------------------------------------------------------------------
// Textual entry
// ---------------------------------------------------------------------------

/// Parses a principal typed into a number field. Only plain ASCII digits
/// are accepted; signs, separators and decimal points yield `None`.
pub fn parse_principal_text(text: &str) -> Option<Money> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<Money>().ok()
}

pub fn parse_rate_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Parses a typed tenure. The range check happens on the decimal value and
/// only then is the fraction dropped, so "5.5" yields 5 and "40.5" is refused.
pub fn parse_tenure_text(text: &str) -> Option<Years> {
    let value = Decimal::from_str(text.trim()).ok()?;
    if value < Decimal::from(TENURE_MIN) || value > Decimal::from(TENURE_MAX) {
        return None;
    }
    value.trunc().to_u32()
}

// ---------------------------------------------------------------------------
// Strict validation (one-shot API)
// ---------------------------------------------------------------------------

/// Validates an untrusted input triple, returning it with the rate rounded
/// to its stored precision.
pub fn validate_input(input: &EmiInput) -> EmiResult<EmiInput> {
    if !is_valid_principal(input.principal) {
        return Err(EmiError::InvalidInput {
            field: "principal".into(),
            reason: format!(
                "Principal must have {PRINCIPAL_MIN_DIGITS} to {PRINCIPAL_MAX_DIGITS} digits, got {}",
                input.principal
            ),
        });
    }
    let annual_rate = normalize_rate(input.annual_rate).ok_or_else(|| EmiError::InvalidInput {
        field: "annual_rate".into(),
        reason: format!(
            "Annual rate must be between {RATE_MIN}% and {RATE_MAX}%, got {}%",
            input.annual_rate
        ),
    })?;
    if !is_valid_tenure(input.tenure_years) {
        return Err(EmiError::InvalidInput {
            field: "tenure_years".into(),
            reason: format!(
                "Tenure must be between {TENURE_MIN} and {TENURE_MAX} years, got {}",
                input.tenure_years
            ),
        });
    }

    Ok(EmiInput {
        principal: input.principal,
        annual_rate,
        tenure_years: input.tenure_years,
    })
}
