//! Discounted isoelastic welfare of a post-step state.

use thiserror::Error;

use crate::{
    Float,
    model::{Action, Params, State},
};

/// A reward term that has no finite real value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericFault {
    #[error("pollution {pollution} does not exceed its floor {floor}")]
    PollutionAtFloor { pollution: Float, floor: Float },

    #[error("{term}: negative base {base} raised to fractional power {exponent}")]
    ComplexPower {
        term: &'static str,
        base: Float,
        exponent: Float,
    },

    #[error("{term} evaluated to {value}")]
    NonFinite { term: &'static str, value: Float },
}

/// `base^exponent`, or the fault that makes it undefined over the reals.
fn real_powf(term: &'static str, base: Float, exponent: Float) -> Result<Float, NumericFault> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(NumericFault::ComplexPower {
            term,
            base,
            exponent,
        });
    }
    finite(term, base.powf(exponent))
}

fn finite(term: &'static str, value: Float) -> Result<Float, NumericFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericFault::NonFinite { term, value })
    }
}

/// Discounted isoelastic utility of `state` under `action` at episode time
/// `time`:
///
/// ```text
/// W = (C (alpha_2 eP)^eta (M - M_tilde)^-epsilon (nu_2 g)^omega)^(1 - sigma)
/// r = exp(-(rho - n) t) (W - 1) / (1 - sigma)
/// ```
///
/// Any term without a finite real value is reported as a [`NumericFault`];
/// the pollution gap `M - M_tilde` must be strictly positive.
pub fn score(state: &State, action: &Action, time: u64, params: &Params) -> Result<Float, NumericFault> {
    let p = params;

    let gap = state.pollution - p.pollution_floor;
    if gap <= 0.0 || gap.is_nan() {
        return Err(NumericFault::PollutionAtFloor {
            pollution: state.pollution,
            floor: p.pollution_floor,
        });
    }

    let energy = real_powf(
        "energy policy term",
        p.energy_policy_weight * action.energy_expenditure,
        p.energy_elasticity,
    )?;
    let damage = real_powf("pollution damage term", gap, -p.pollution_aversion)?;
    let green = real_powf(
        "green capital term",
        action.welfare_share * state.green_capital,
        p.green_elasticity,
    )?;
    let base = finite("welfare base", action.consumption * energy * damage * green)?;
    let welfare = real_powf("welfare component", base, 1.0 - p.risk_aversion)?;

    let discount = (-(p.time_preference - p.population_growth) * time as Float).exp();
    finite(
        "discounted utility",
        discount * (welfare - 1.0) / (1.0 - p.risk_aversion),
    )
}
