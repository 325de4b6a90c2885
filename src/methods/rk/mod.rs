//! Explicit Runge-Kutta integrators

mod rk23;

pub use rk23::rk23;
