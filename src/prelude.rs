//! Convenient prelude: the types needed to build and drive an environment.
//!
//! ```rust
//! use mpiam::prelude::*;
//! ```

pub use crate::{
    Action, EconomyEnv, Error, Float, Integrator, Method, Params, RenderMode, State, Step,
    StepInfo,
    model::{dynamics::rates, reward::score},
};
