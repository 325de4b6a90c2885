//! Compute an initial step size guess

use crate::{Float, ode::ODE, tolerance::Tolerance};

/// Starting step size for an explicit method of order `iord`.
///
/// Uses one explicit Euler step to estimate the second derivative and picks
/// `h` so that the local error of the first step is roughly `0.01` in the
/// scaled norm, capped by `hmax`. The sign of the result follows `posneg`.
pub(crate) fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    posneg: Float,
    f0: &[Float],
    f1: &mut [Float],
    y1: &mut [Float],
    iord: usize,
    hmax: Float,
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float
where
    F: ODE,
{
    let n = y.len();
    let mut dnf: Float = 0.0;
    let mut dny: Float = 0.0;
    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        dnf += (f0[i] / sk).powi(2);
        dny += (y[i] / sk).powi(2);
    }

    let mut h = if dnf <= 1e-10 || dny <= 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    h = h.min(hmax.abs()) * posneg.signum();

    // Explicit Euler step
    for i in 0..n {
        y1[i] = y[i] + h * f0[i];
    }
    f.ode(x + h, y1, f1);

    // Second derivative estimate
    let mut der2: Float = 0.0;
    for i in 0..n {
        let sk = atol[i] + rtol[i] * y[i].abs();
        der2 += ((f1[i] - f0[i]) / sk).powi(2);
    }
    der2 = der2.sqrt() / h.abs();

    let der12 = der2.abs().max(dnf.sqrt());
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h.abs() * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    (100.0 * h.abs()).min(h1).min(hmax.abs()) * posneg.signum()
}
