//! Advance the model by one unit of time.

use std::str::FromStr;

use bon::Builder;

use crate::{
    Error, Float,
    methods::{dp::dopri5, result::IntegrationResult, rk::rk23, settings::Settings},
    model::{Action, Params, STATE_DIM, State, dynamics::Dynamics},
    ode::ODE,
    solout::{FiniteGuard, SolOut},
    tolerance::Tolerance,
};

/// Default `rtol` and `atol`, matching the classic LSODA `odeint` driver.
pub const DEFAULT_TOLERANCE: Float = 1.49012e-8;

/// Adaptive solver used for each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// Dormand–Prince 5(4).
    #[default]
    Dopri5,
    /// Bogacki–Shampine 3(2).
    Rk23,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dopri5" | "rk45" => Ok(Method::Dopri5),
            "rk23" => Ok(Method::Rk23),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Solves the initial-value problem over `[0, 1]` with the control held
/// constant, returning the state at `t = 1`.
///
/// # Example
///
/// ```no_run
/// use mpiam::{Integrator, Method, Params, State};
///
/// let params = Params::from_yaml_file("parameters.yaml")?;
/// let integrator = Integrator::builder()
///     .method(Method::Rk23)
///     .rtol(1e-10)
///     .atol(1e-10)
///     .build();
/// let action = [50.0, 20.0, 0.1, 0.5, 0.5, 0.5, 0.01].into();
/// let _next = integrator.advance(&State::INITIAL, &action, &params)?;
/// # Ok::<(), mpiam::Error>(())
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Integrator {
    #[builder(default)]
    pub method: Method,
    #[builder(default = Tolerance::Scalar(DEFAULT_TOLERANCE), into)]
    pub rtol: Tolerance,
    #[builder(default = Tolerance::Scalar(DEFAULT_TOLERANCE), into)]
    pub atol: Tolerance,
    #[builder(default)]
    pub settings: Settings,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Integrator {
    /// New state after one time unit under `control`.
    ///
    /// Faults propagate instead of being clamped: non-finite rates at the
    /// initial condition, an unsuccessful solver status and a non-finite
    /// accepted state are all errors.
    pub fn advance(&self, state: &State, control: &Action, params: &Params) -> Result<State, Error> {
        let dynamics = Dynamics::new(params, *control);

        let mut rates = [0.0; STATE_DIM];
        dynamics.ode(0.0, &state.to_array(), &mut rates);
        if rates.iter().any(|r| !r.is_finite()) {
            return Err(Error::NonFiniteRates {
                rates: rates.to_vec(),
            });
        }

        let mut y = state.to_array();
        let mut guard = FiniteGuard::new();
        let result = self.solve(&dynamics, 0.0, 1.0, &mut y, &mut guard)?;
        tracing::trace!(
            method = ?self.method,
            nfev = result.evals.ode,
            accepted = result.steps.accepted,
            rejected = result.steps.rejected,
            "integrated one time unit"
        );

        if let Some(t) = guard.tripped_at() {
            return Err(Error::NonFiniteState { t, state: y.to_vec() });
        }
        if !result.status.is_success() {
            return Err(Error::Integration {
                t: result.x,
                status: result.status,
            });
        }

        let next = State::from(y);
        if !next.is_finite() {
            return Err(Error::NonFiniteState {
                t: result.x,
                state: y.to_vec(),
            });
        }
        Ok(next)
    }

    /// Run the configured method on an arbitrary system.
    pub fn solve<F: ODE, S: SolOut>(
        &self,
        f: &F,
        x0: Float,
        xend: Float,
        y: &mut [Float],
        solout: &mut S,
    ) -> Result<IntegrationResult, Error> {
        let result = match self.method {
            Method::Dopri5 => dopri5(f, x0, xend, y, &self.rtol, &self.atol, solout, &self.settings),
            Method::Rk23 => rk23(f, x0, xend, y, &self.rtol, &self.atol, solout, &self.settings),
        };
        result.map_err(Error::from)
    }
}
