pub mod calculate;
pub mod schedule;
pub mod session;
