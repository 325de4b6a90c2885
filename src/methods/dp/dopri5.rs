//! DOPRI5 - Dormand–Prince 5(4) explicit Runge–Kutta integrator
//!
//! # Authors and attribution
//!
//! Translator / maintainer
//! - Ryan D. Gast <ryan.d.gast@gmail.com> (2025)
//!
//! Original authors
//! - E. Hairer and G. Wanner
//!   Université de Genève - Dept. de Mathématiques
//!   Emails: Ernst.Hairer@unige.ch, Gerhard.Wanner@unige.ch
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).
//!
//! Original Fortran implementation and supporting material
//! - https://www.unige.ch/~hairer/software.html
//!
//! Step-size control, Lund stabilisation and the stiffness test follow the
//! Fortran code.

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

/// Dormand–Prince DOPRI5: embedded Runge–Kutta 5(4) pair with adaptive
/// step-size control.
///
/// Integrates `y' = f(x, y)` from `x` to `xend`, advancing `y` in place.
/// `solout` is called once before the first step and after every accepted
/// step. Every option in `settings` left as `None` takes the classic
/// default:
///
/// - `uround` `2.3e-16`, `safety_factor` `0.9`
/// - `scale_min` `0.2`, `scale_max` `10.0`
/// - `beta` `0.04`
/// - `hmax` `|xend - x|`, `h0` from an explicit Euler probe
/// - `nmax` `100_000`, `nstiff` `1000`
///
/// Input validation problems are all collected and returned together.
pub fn dopri5<F, S>(
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

    let uround = settings.uround.unwrap_or(2.3e-16);
    if uround <= 1e-35 || uround >= 1.0 {
        errors.push(SettingsError::URoundOutOfRange(uround));
    }

    let safety_factor = settings.safety_factor.unwrap_or(0.9);
    if safety_factor >= 1.0 || safety_factor <= 1e-4 {
        errors.push(SettingsError::SafetyFactorOutOfRange(safety_factor));
    }

    let scale_min = settings.scale_min.unwrap_or(0.2);
    let scale_max = settings.scale_max.unwrap_or(10.0);
    if scale_min <= 0.0 || scale_min >= 1.0 || scale_max <= 1.0 {
        errors.push(SettingsError::InvalidScaleFactors(scale_min, scale_max));
    }
    let facc1 = 1.0 / scale_min;
    let facc2 = 1.0 / scale_max;

    let beta = settings.beta.unwrap_or(0.04).max(0.0);
    if beta > 0.2 {
        errors.push(SettingsError::BetaTooLarge(beta));
    }

    let h_max = settings.hmax.map_or((xend - x).abs(), Float::abs);

    let nmax = settings.nmax.unwrap_or(100_000);
    if nmax == 0 {
        errors.push(SettingsError::NMaxMustBePositive(nmax));
    }

    let nstiff = settings.nstiff.unwrap_or(1000);
    if nstiff == 0 {
        errors.push(SettingsError::NStiffMustBePositive(nstiff));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // --- Declarations ---
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut ysti = vec![0.0; n];
    let mut facold: Float = 1e-4;
    let mut last = false;
    let mut reject = false;
    let mut nonstiff = 0;
    let mut hlamb = 0.0;
    let mut iasti = 0;
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let status;
    let expo1 = 0.2 - beta * 0.75;
    let posneg = (xend - x).signum();

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    evals.ode += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.abs().min(h_max) * posneg,
        None => {
            evals.ode += 1;
            hinit(f, x, y, posneg, &k1, &mut k2, &mut y1, 5, h_max, atol, rtol)
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

        // Underflow due to machine rounding
        if 0.1 * h.abs() <= x.abs() * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        // Land exactly on xend
        if (x + 1.01 * h - xend) * posneg > 0.0 {
            h = xend - x;
            last = true;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &y1, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(x + C3 * h, &y1, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(x + C4 * h, &y1, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(x + C5 * h, &y1, &mut k5);

        // Stage 6
        for i in 0..n {
            ysti[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        let xph = x + h;
        f.ode(xph, &ysti, &mut k6);

        // Final stage (FSAL)
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(xph, &y1, &mut k2);
        evals.ode += 6;

        // Embedded error estimate, stored in k4
        for i in 0..n {
            k4[i] =
                (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]) * h;
        }

        let mut err: Float = 0.0;
        for i in 0..n {
            let sk = atol[i] + rtol[i] * y[i].abs().max(y1[i].abs());
            err += (k4[i] / sk).powi(2);
        }
        err = (err / n as Float).sqrt();

        // Computation of hnew with Lund stabilisation,
        // constrained to scale_min <= hnew/h <= scale_max
        let fac11 = err.powf(expo1);
        let fac = facc2.max(facc1.min(fac11 / facold.powf(beta) / safety_factor));
        let mut hnew = h / fac;

        if err <= 1.0 {
            // Step accepted
            facold = err.max(1.0e-4);
            steps.accepted += 1;

            // Stiffness detection
            if steps.accepted % nstiff == 0 || iasti > 0 {
                let mut stnum: Float = 0.0;
                let mut stden: Float = 0.0;
                for i in 0..n {
                    stnum += (k2[i] - k6[i]).powi(2);
                    stden += (y1[i] - ysti[i]).powi(2);
                }
                if stden > 0.0 {
                    hlamb = h.abs() * (stnum / stden).sqrt();
                }
                if hlamb > 3.25 {
                    nonstiff = 0;
                    iasti += 1;
                    if iasti == 15 {
                        status = Status::ProbablyStiff;
                        break;
                    }
                } else {
                    nonstiff += 1;
                    if nonstiff == 6 {
                        iasti = 0;
                    }
                }
            }

            k1.copy_from_slice(&k2);
            y.copy_from_slice(&y1);
            let xold = x;
            x = xph;

            if solout.solout(xold, x, y) == ControlFlag::Interrupt {
                status = Status::UserInterrupt;
                break;
            }

            if last {
                h = hnew;
                status = Status::Success;
                break;
            }

            if hnew.abs() > h_max {
                hnew = posneg * h_max;
            }

            // Prevent oscillations due to previous rejected step
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            // Step rejected
            hnew = h / facc1.min(fac11 / safety_factor);
            reject = true;
            steps.rejected += 1;
            last = false;
        }
        h = hnew;
    }

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;
