//! Right-hand side of an ODE system.

use crate::Float;

/// Right-hand side `y' = f(x, y)` of a first-order ODE system.
///
/// The solvers in [`crate::methods`] call `ode` many times per step with
/// trial states. Implementations write one derivative per state component
/// into `dydx` and must not panic for any finite or non-finite input:
/// singular regions should produce non-finite derivatives, which the
/// solvers and [`crate::Integrator`] turn into errors.
///
/// # Example
///
/// ```
/// use mpiam::{Float, ODE};
///
/// struct Decay {
///     rate: Float,
/// }
///
/// impl ODE for Decay {
///     fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
///         for (d, yi) in dydx.iter_mut().zip(y) {
///             *d = -self.rate * yi;
///         }
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]);
}
