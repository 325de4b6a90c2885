//! Adaptive explicit Runge-Kutta solvers.

pub mod dp;
pub mod result;
pub mod rk;
pub mod settings;
