//! Bogacki–Shampine 3(2) pair (RK23) adaptive-step integrator.

use crate::{
    Float,
    error::SettingsError,
    hinit::hinit,
    methods::{
        result::{Evals, IntegrationResult, Steps},
        settings::{Settings, check_h0, check_tolerances},
    },
    ode::ODE,
    solout::{ControlFlag, SolOut},
    status::Status,
    tolerance::Tolerance,
};

/// Bogacki–Shampine 3(2) pair with local extrapolation.
///
/// Cheaper per step than [`crate::methods::dp::dopri5`] but needs many more
/// steps at tight tolerances. Defaults for unset [`Settings`]:
/// `safety_factor` `0.9`, `scale_min` `0.2`, `scale_max` `5.0`,
/// `hmax` `|xend - x|`, `nmax` `100_000`. `uround`, `beta` and `nstiff`
/// are not used by this method.
pub fn rk23<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: &Tolerance,
    atol: &Tolerance,
    solout: &mut S,
    settings: &Settings,
) -> Result<IntegrationResult, Vec<SettingsError>>
where
    F: ODE,
    S: SolOut,
{
    // --- Input Validation ---
    let mut errors: Vec<SettingsError> = Vec::new();
    let n = y.len();
    check_tolerances(rtol, atol, n, &mut errors);
    check_h0(settings.h0, &mut errors);

    let nmax = settings.nmax.unwrap_or(100_000);
    if nmax == 0 {
        errors.push(SettingsError::NMaxMustBePositive(nmax));
    }

    let safety_factor = settings.safety_factor.unwrap_or(0.9);
    if safety_factor >= 1.0 || safety_factor <= 1e-4 {
        errors.push(SettingsError::SafetyFactorOutOfRange(safety_factor));
    }

    let scale_min = settings.scale_min.unwrap_or(0.2);
    let scale_max = settings.scale_max.unwrap_or(5.0);
    if scale_min <= 0.0 || scale_min >= 1.0 || scale_max <= 1.0 {
        errors.push(SettingsError::InvalidScaleFactors(scale_min, scale_max));
    }

    let hmax = settings.hmax.map_or((xend - x).abs(), Float::abs);

    if !errors.is_empty() {
        return Err(errors);
    }

    // --- Declarations ---
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];
    let mut ye = vec![0.0; n];
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let status;
    let direction = (xend - x).signum();
    let error_exponent: Float = -1.0 / 3.0;

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    evals.ode += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.abs().min(hmax) * direction,
        None => {
            evals.ode += 1;
            hinit(f, x, y, direction, &k1, &mut k2, &mut k3, 3, hmax, atol, rtol)
        }
    };

    if solout.solout(x, x, y) == ControlFlag::Interrupt {
        return Ok(IntegrationResult::new(
            x,
            h,
            Status::UserInterrupt,
            evals,
            steps,
        ));
    }

    // --- Main integration loop ---
    loop {
        if steps.total >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        if h.abs() <= 10.0 * Float::EPSILON * x.abs() {
            status = Status::StepSizeTooSmall;
            break;
        }

        let last = (x + h - xend) * direction >= 0.0;
        if last {
            h = xend - x;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            yt[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &yt, &mut k2);

        // Stage 3
        for i in 0..n {
            yt[i] = y[i] + h * A32 * k2[i];
        }
        f.ode(x + C3 * h, &yt, &mut k3);

        // Third order solution
        for i in 0..n {
            yt[i] = y[i] + h * (B1 * k1[i] + B2 * k2[i] + B3 * k3[i]);
        }

        // Derivative at the new point, reused as k1 when accepted
        f.ode(x + h, &yt, &mut k4);
        evals.ode += 3;

        // Difference to the embedded second order solution
        for i in 0..n {
            ye[i] = h * (E1 * k1[i] + E2 * k2[i] + E3 * k3[i] + E4 * k4[i]);
        }

        let mut err: Float = 0.0;
        for i in 0..n {
            let tol = atol[i] + rtol[i] * yt[i].abs().max(y[i].abs());
            err += (ye[i] / tol).powi(2);
        }
        err = (err / n as Float).sqrt();

        if err <= 1.0 {
            steps.accepted += 1;

            y.copy_from_slice(&yt);
            k1.copy_from_slice(&k4);
            let xold = x;
            x = if last { xend } else { x + h };

            if solout.solout(xold, x, y) == ControlFlag::Interrupt {
                status = Status::UserInterrupt;
                break;
            }

            if last {
                status = Status::Success;
                break;
            }

            let factor = (safety_factor * err.powf(error_exponent)).clamp(scale_min, scale_max);
            h = (h * factor).clamp(-hmax, hmax);
        } else {
            steps.rejected += 1;
            // A NaN error shrinks the step as hard as allowed
            let factor = safety_factor * err.powf(error_exponent);
            h *= if factor.is_nan() {
                scale_min
            } else {
                factor.clamp(scale_min, 1.0)
            };
        }
    }

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

// RK23 Butcher tableau coefficients
const C2: Float = 0.5;
const C3: Float = 0.75;

const A21: Float = 0.5;
const A32: Float = 0.75;

const B1: Float = 2.0 / 9.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 4.0 / 9.0;

const E1: Float = 5.0 / 72.0;
const E2: Float = -1.0 / 12.0;
const E3: Float = -1.0 / 9.0;
const E4: Float = 1.0 / 8.0;
