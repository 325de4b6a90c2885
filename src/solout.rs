//! Callback hook executed after each accepted step.

use crate::Float;

/// Return flags for [`SolOut`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlag {
    /// Proceed with the integration.
    Continue,
    /// Stop and return [`crate::Status::UserInterrupt`].
    Interrupt,
}

/// Observer called once before the main loop (with `xold == x`) and after
/// every accepted step with the new abscissa `x` and solution `y`.
pub trait SolOut {
    fn solout(&mut self, xold: Float, x: Float, y: &[Float]) -> ControlFlag;
}

/// Stops the solve as soon as an accepted state contains a non-finite value.
///
/// A step whose trial state overflows can still pass the error test, because
/// the error norm is scaled by the (infinite) state itself.
#[derive(Debug, Default, Clone)]
pub struct FiniteGuard {
    tripped_at: Option<Float>,
}

impl FiniteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abscissa of the first non-finite accepted state, if any.
    pub fn tripped_at(&self) -> Option<Float> {
        self.tripped_at
    }
}

impl SolOut for FiniteGuard {
    fn solout(&mut self, _xold: Float, x: Float, y: &[Float]) -> ControlFlag {
        if y.iter().all(|v| v.is_finite()) {
            ControlFlag::Continue
        } else {
            self.tripped_at = Some(x);
            ControlFlag::Interrupt
        }
    }
}
