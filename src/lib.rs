//! A multi-phase integrated assessment model of a coupled
//! environmental-economic system, exposed as a step-wise decision
//! environment.
//!
//! Each step integrates the five stock equations of [`model::dynamics`]
//! over one unit of time with an adaptive Runge-Kutta solver from
//! [`methods`], then scores the new state with the discounted welfare of
//! [`model::reward`]. [`EconomyEnv`] owns the episode.

mod error;
mod hinit;
mod ode;
mod solout;
mod status;
mod tolerance;

pub mod env;
pub mod integrator;
pub mod methods;
pub mod model;
pub mod prelude;

pub use env::{BoxSpace, EconomyEnv, RenderMode, Step, StepInfo};
pub use error::{Error, SettingsError};
pub use integrator::{Integrator, Method};
pub use methods::{result::IntegrationResult, settings::Settings};
pub use model::{Action, Params, State, reward::NumericFault};
pub use ode::ODE;
pub use solout::{ControlFlag, FiniteGuard, SolOut};
pub use status::Status;
pub use tolerance::Tolerance;

/// Floating point type used throughout the crate.
pub type Float = f64;
