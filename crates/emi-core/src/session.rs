use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::validation::{
    is_valid_principal, is_valid_tenure, normalize_rate, parse_principal_text, parse_rate_text,
    parse_tenure_text, validate_input,
};
use crate::engine::{compute, EmiBreakdown};
use crate::types::{EmiInput, Money, Rate, Years};
use crate::EmiResult;

pub const DEFAULT_PRINCIPAL: Money = 1_000_000;
pub const DEFAULT_ANNUAL_RATE: Rate = dec!(6.5);
pub const DEFAULT_TENURE_YEARS: Years = 5;

/// Interactive calculator state: three inputs and the outputs derived from them.
///
/// Inputs only change through the `accept_*` gates. A rejected candidate
/// leaves the session untouched; an accepted one recomputes every derived
/// value before the gate returns, so a reader never observes a stale mix.
#[derive(Debug, Clone, PartialEq)]
pub struct EmiSession {
    input: EmiInput,
    derived: EmiBreakdown,
}

/// Point-in-time view of a session, suitable for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_years: Years,
    pub monthly_emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
}

/// Which input an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Principal,
    Rate,
    Tenure,
}

/// A raw edit as typed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEdit {
    pub field: InputField,
    pub value: String,
}

/// Outcome of replaying one edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayStep {
    pub step: usize,
    pub field: InputField,
    pub value: String,
    pub accepted: bool,
    pub state: SessionState,
}

impl Default for EmiSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EmiSession {
    /// Session seeded with 1,000,000 at 6.5% over 5 years.
    pub fn new() -> Self {
        Self::from_accepted(EmiInput {
            principal: DEFAULT_PRINCIPAL,
            annual_rate: DEFAULT_ANNUAL_RATE,
            tenure_years: DEFAULT_TENURE_YEARS,
        })
    }

    /// Session seeded with caller-supplied inputs, which must pass validation.
    pub fn with_inputs(principal: Money, annual_rate: Decimal, tenure_years: Years) -> EmiResult<Self> {
        let input = validate_input(&EmiInput {
            principal,
            annual_rate,
            tenure_years,
        })?;
        Ok(Self::from_accepted(input))
    }

    fn from_accepted(input: EmiInput) -> Self {
        Self {
            input,
            derived: compute(&input),
        }
    }

    fn recompute(&mut self) {
        self.derived = compute(&self.input);
        tracing::debug!(
            principal = self.input.principal,
            annual_rate = %self.input.annual_rate,
            tenure_years = self.input.tenure_years,
            monthly_emi = self.derived.monthly_emi,
            "recomputed EMI"
        );
    }

    // -----------------------------------------------------------------------
    // Gates
    // -----------------------------------------------------------------------

    /// Replace the principal if it has 6 to 8 digits. Returns whether it was applied.
    pub fn accept_principal(&mut self, candidate: Money) -> bool {
        if !is_valid_principal(candidate) {
            tracing::debug!(candidate, "principal rejected");
            return false;
        }
        self.input.principal = candidate;
        self.recompute();
        true
    }

    /// Replace the rate if it lies in 1..=45, storing it rounded to two decimals.
    pub fn accept_rate(&mut self, candidate: Decimal) -> bool {
        let Some(rate) = normalize_rate(candidate) else {
            tracing::debug!(candidate = %candidate, "rate rejected");
            return false;
        };
        self.input.annual_rate = rate;
        self.recompute();
        true
    }

    /// Replace the tenure if it lies in 1..=40 years.
    pub fn accept_tenure(&mut self, candidate: Years) -> bool {
        if !is_valid_tenure(candidate) {
            tracing::debug!(candidate, "tenure rejected");
            return false;
        }
        self.input.tenure_years = candidate;
        self.recompute();
        true
    }

    pub fn accept_principal_text(&mut self, text: &str) -> bool {
        match parse_principal_text(text) {
            Some(candidate) => self.accept_principal(candidate),
            None => {
                tracing::debug!(text, "principal text unparseable");
                false
            }
        }
    }

    pub fn accept_rate_text(&mut self, text: &str) -> bool {
        match parse_rate_text(text) {
            Some(candidate) => self.accept_rate(candidate),
            None => {
                tracing::debug!(text, "rate text unparseable");
                false
            }
        }
    }

    pub fn accept_tenure_text(&mut self, text: &str) -> bool {
        match parse_tenure_text(text) {
            Some(candidate) => self.accept_tenure(candidate),
            None => {
                tracing::debug!(text, "tenure text rejected");
                false
            }
        }
    }

    /// Route a typed edit to the matching text gate.
    pub fn apply(&mut self, edit: &SessionEdit) -> bool {
        match edit.field {
            InputField::Principal => self.accept_principal_text(&edit.value),
            InputField::Rate => self.accept_rate_text(&edit.value),
            InputField::Tenure => self.accept_tenure_text(&edit.value),
        }
    }

    /// Apply edits in order, recording the state after each one.
    pub fn replay(&mut self, edits: &[SessionEdit]) -> Vec<ReplayStep> {
        edits
            .iter()
            .enumerate()
            .map(|(i, edit)| {
                let accepted = self.apply(edit);
                ReplayStep {
                    step: i + 1,
                    field: edit.field,
                    value: edit.value.clone(),
                    accepted,
                    state: self.state(),
                }
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    pub fn principal(&self) -> Money {
        self.input.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.input.annual_rate
    }

    pub fn tenure_years(&self) -> Years {
        self.input.tenure_years
    }

    pub fn monthly_emi(&self) -> Money {
        self.derived.monthly_emi
    }

    pub fn total_interest(&self) -> Money {
        self.derived.total_interest
    }

    pub fn total_amount(&self) -> Money {
        self.derived.total_amount
    }

    pub fn input(&self) -> &EmiInput {
        &self.input
    }

    pub fn summary(&self) -> &EmiBreakdown {
        &self.derived
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            principal: self.input.principal,
            annual_rate: self.input.annual_rate,
            tenure_years: self.input.tenure_years,
            monthly_emi: self.derived.monthly_emi,
            total_interest: self.derived.total_interest,
            total_amount: self.derived.total_amount,
        }
    }
}
