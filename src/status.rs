//! Termination status of a solver run.

/// Why a solver returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached `xend`.
    Success,
    /// A [`crate::SolOut`] callback asked to stop.
    UserInterrupt,
    /// The step budget (`nmax`) ran out before `xend`.
    NeedLargerNMax,
    /// The step size fell below the rounding unit relative to `x`.
    StepSizeTooSmall,
    /// The stiffness test fired repeatedly.
    ProbablyStiff,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}
