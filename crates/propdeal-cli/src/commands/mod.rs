pub mod analyze;
pub mod grade;
pub mod irr;
pub mod mortgage;

use clap::ValueEnum;
use propdeal_core::grading::GradePolicy;

/// Grading policy selector shared by `analyze` and `grade`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyChoice {
    /// Six-factor policy with DSCR and IRR.
    Standard,
    /// Earlier four-factor policy (ROI, cash flow, net and gross yield).
    LegacyV1,
}

impl PolicyChoice {
    pub fn to_policy(self) -> GradePolicy {
        match self {
            PolicyChoice::Standard => GradePolicy::standard(),
            PolicyChoice::LegacyV1 => GradePolicy::legacy_v1(),
        }
    }
}
