#![allow(dead_code)]

use std::path::PathBuf;

use mpiam::{Action, Float, Params};

/// Path to the reference parameter file shipped with the crate.
pub fn reference_params_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("parameters.yaml")
}

pub fn reference_params() -> Params {
    Params::from_yaml_file(reference_params_path()).expect("reference parameters load")
}

/// Control used for the golden-value scenarios.
pub fn golden_action() -> Action {
    Action::from([50.0, 20.0, 0.1, 0.5, 0.5, 0.5, 0.01])
}

/// State after one step of `golden_action` from the initial state.
pub const GOLDEN_STATE_1: [Float; 5] = [
    1184.2714746797255,
    499.9,
    384.51630476379563,
    217.2342164280064,
    205.85246905991386,
];
/// Reward of that step, discounted at `t = 1`.
pub const GOLDEN_REWARD_1: Float = 1.7688180812942078;

/// State after a second identical step.
pub const GOLDEN_STATE_2: [Float; 5] = [
    1360.4057747676798,
    499.8,
    369.65055246061803,
    132.17893913484713,
    211.4195098356843,
];
/// Reward of the second step, discounted at `t = 2`.
pub const GOLDEN_REWARD_2: Float = 1.7598935559840025;

pub fn assert_state_close(actual: [Float; 5], expected: [Float; 5], tol: Float) {
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "component {i}: got {a}, expected {e} (tol {tol})"
        );
    }
}
