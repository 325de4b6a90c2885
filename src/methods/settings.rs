//! Settings for numerical integrators

use bon::Builder;

use crate::{Float, error::SettingsError, tolerance::Tolerance};

/// Optional knobs shared by the adaptive solvers. `None` selects the
/// method's default, which suits most problems.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// The rounding unit, typically machine epsilon.
    pub uround: Option<Float>,
    /// Safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Lower bound of `hnew / hold`.
    pub scale_min: Option<Float>,
    /// Upper bound of `hnew / hold`.
    pub scale_max: Option<Float>,
    /// Lund stabilisation parameter for DOPRI5. Values up to 0.04 make the
    /// step-size control smoother; negative values are treated as zero.
    pub beta: Option<Float>,
    /// Maximal step size. Default is `|xend - x0|`.
    pub hmax: Option<Float>,
    /// Initial step size. `None` derives one from an explicit Euler probe.
    pub h0: Option<Float>,
    /// Maximum number of attempted steps, accepted or rejected. The solver
    /// stops with [`Status::NeedLargerNMax`](crate::Status::NeedLargerNMax)
    /// once that many have been taken.
    pub nmax: Option<usize>,
    /// Number of accepted steps between two stiffness tests.
    pub nstiff: Option<usize>,
}

/// Push an error for each tolerance that is non-positive or has the wrong
/// length for an `n`-dimensional system.
pub(crate) fn check_tolerances(
    rtol: &Tolerance,
    atol: &Tolerance,
    n: usize,
    errors: &mut Vec<SettingsError>,
) {
    if !rtol.is_valid_for(n) {
        errors.push(SettingsError::InvalidTolerance("rtol"));
    }
    if !atol.is_valid_for(n) {
        errors.push(SettingsError::InvalidTolerance("atol"));
    }
}

/// Validate a user-supplied initial step.
pub(crate) fn check_h0(h0: Option<Float>, errors: &mut Vec<SettingsError>) {
    if let Some(h) = h0 {
        if h == 0.0 || !h.is_finite() {
            errors.push(SettingsError::InvalidStepSize(h));
        }
    }
}
