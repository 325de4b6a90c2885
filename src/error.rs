//! Errors for the solvers, the parameter loader and the environment.

use std::path::PathBuf;

use thiserror::Error;

use crate::{Float, Status};

/// Validation errors for solver [`crate::methods::settings::Settings`] and
/// tolerances.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),
    #[error("nstiff must be positive (got {0})")]
    NStiffMustBePositive(usize),
    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),
    #[error("scale factors must satisfy 0 < scale_min < 1 < scale_max (got {0}, {1})")]
    InvalidScaleFactors(Float, Float),
    #[error("initial step size must be non-zero and finite (got {0})")]
    InvalidStepSize(Float),
    #[error("{0} must be positive and match the state dimension")]
    InvalidTolerance(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read parameter file {}: {source}", .path.display())]
    ParamsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed parameter file: {0}")]
    ParamsParse(#[from] serde_yaml::Error),

    #[error("invalid parameter `{name}`: {reason} (got {value})")]
    InvalidParameter {
        name: &'static str,
        value: Float,
        reason: &'static str,
    },

    #[error("invalid integrator settings: {}", join(.0))]
    Settings(Vec<SettingsError>),

    #[error("dynamics are not finite at the initial condition: {rates:?}")]
    NonFiniteRates { rates: Vec<Float> },

    #[error("integration stopped at t = {t} with status {status:?}")]
    Integration { t: Float, status: Status },

    #[error("integration produced a non-finite state at t = {t}: {state:?}")]
    NonFiniteState { t: Float, state: Vec<Float> },

    #[error("unsupported render mode `{0}`: only console and human are implemented")]
    UnsupportedRenderMode(String),

    #[error("failed to write rendering: {0}")]
    Render(#[source] std::io::Error),

    #[error("unknown integration method `{0}`: expected dopri5 or rk23")]
    UnknownMethod(String),
}

fn join(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<SettingsError>> for Error {
    fn from(errors: Vec<SettingsError>) -> Self {
        Error::Settings(errors)
    }
}
