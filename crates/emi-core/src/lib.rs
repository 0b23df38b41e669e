pub mod bridge;
pub mod engine;
pub mod error;
pub mod session;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use error::EmiError;
pub use session::EmiSession;
pub use types::*;

/// Standard result type for all EMI engine operations
pub type EmiResult<T> = Result<T, EmiError>;
