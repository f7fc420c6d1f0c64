pub mod amortization;
pub mod cashflow;
pub mod engine;
pub mod error;
pub mod grading;
pub mod irr;
pub mod types;

pub use engine::{analyze, analyze_with_policy, DealAnalysis};
pub use error::EngineError;
pub use types::*;

/// Standard result type for fallible engine helpers.
pub type EngineResult<T> = Result<T, EngineError>;
