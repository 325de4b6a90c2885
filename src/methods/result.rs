//! Data structure for holding the result of integrations

use crate::{Float, status::Status};

/// Counts of right-hand side evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evals {
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Step counters of a solver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steps {
    /// Attempted steps, accepted or not.
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a numerical integrator. The solution itself is written
/// back into the caller's state buffer.
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable
    pub x: Float,
    /// Predicted size of the next step
    pub h: Float,
    pub status: Status,
    pub evals: Evals,
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(x: Float, h: Float, status: Status, evals: Evals, steps: Steps) -> Self {
        Self {
            x,
            h,
            status,
            evals,
            steps,
        }
    }
}
