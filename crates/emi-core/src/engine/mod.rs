pub mod calculation;
pub mod validation;

pub use calculation::{annuity_terms, calculate_emi, compute, AnnuityTerms, EmiBreakdown, EmiOutput};
pub use validation::{
    is_valid_principal, is_valid_tenure, normalize_rate, parse_principal_text, parse_rate_text,
    parse_tenure_text,
};
