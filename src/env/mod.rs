//! Episode driver: owns the state, the time counter and the trajectory.

mod render;
mod spaces;

pub use render::RenderMode;
pub use spaces::BoxSpace;

use std::{io::Write, path::Path, sync::Arc};

use crate::{
    Error, Float,
    integrator::Integrator,
    model::{ACTION_DIM, Action, Params, STATE_DIM, State, reward::{self, NumericFault}},
};

/// Diagnostics attached to every [`Step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Time counter after the step.
    pub time: u64,
    /// Set when the reward had no finite value and was replaced by zero.
    pub reward_fault: Option<NumericFault>,
}

/// Result of one call to [`EconomyEnv::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: State,
    pub reward: Float,
    /// Always `false`: episodes have no terminal state, any horizon is the
    /// caller's to impose.
    pub terminated: bool,
    pub info: StepInfo,
}

/// Sequential decision environment around the model.
///
/// Each instance owns its episode; parameters are shared read-only, so many
/// instances built from one `Arc<Params>` can run side by side.
///
/// # Example
///
/// ```no_run
/// use mpiam::{Action, EconomyEnv};
///
/// let mut env = EconomyEnv::from_yaml_file("parameters.yaml")?;
/// env.reset();
/// let action = Action::from([50.0, 20.0, 0.1, 0.5, 0.5, 0.5, 0.01]);
/// let step = env.step(&action)?;
/// println!("{:?} -> {}", step.state, step.reward);
/// # Ok::<(), mpiam::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EconomyEnv {
    params: Arc<Params>,
    integrator: Integrator,
    state: State,
    time: u64,
    history: Vec<State>,
}

impl EconomyEnv {
    pub fn new(params: impl Into<Arc<Params>>) -> Self {
        let env = Self {
            params: params.into(),
            integrator: Integrator::default(),
            state: State::INITIAL,
            time: 0,
            history: Vec::new(),
        };
        tracing::debug!(state = ?env.state, "environment created");
        env
    }

    /// Build from a parameter file. A missing file or key fails here, never
    /// during a step.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::new(Params::from_yaml_file(path)?))
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Return to [`State::INITIAL`] at time zero. The trajectory history is
    /// kept; see [`EconomyEnv::clear_history`].
    pub fn reset(&mut self) -> State {
        self.state = State::INITIAL;
        self.time = 0;
        tracing::debug!(history_len = self.history.len(), "environment reset");
        self.state
    }

    /// Apply `action` for one unit of time.
    ///
    /// The action is not range-checked. An integration fault is returned as
    /// an error and leaves the episode untouched; a reward fault is logged
    /// and scored as zero.
    ///
    /// The reward is discounted at the time counter after the increment, so
    /// the first step after [`EconomyEnv::reset`] is scored at `t = 1`.
    pub fn step(&mut self, action: &Action) -> Result<Step, Error> {
        let next = self.integrator.advance(&self.state, action, &self.params)?;
        self.state = next;
        self.history.push(next);
        self.time += 1;

        let (reward, reward_fault) = match reward::score(&next, action, self.time, &self.params) {
            Ok(reward) => (reward, None),
            Err(fault) => {
                tracing::warn!(time = self.time, %fault, "reward calculation failed, using 0");
                (0.0, Some(fault))
            }
        };
        tracing::debug!(time = self.time, reward, state = ?next, "step");

        Ok(Step {
            state: next,
            reward,
            terminated: false,
            info: StepInfo {
                time: self.time,
                reward_fault,
            },
        })
    }

    /// Write a rendering of the episode to `out`.
    pub fn render<W: Write>(&self, mode: RenderMode, out: &mut W) -> Result<(), Error> {
        match mode {
            RenderMode::Console => render::console(out, &self.state),
            RenderMode::Human => render::history(out, &self.history),
        }
    }

    /// Drop the recorded trajectory without touching the current state.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// States after every completed step, oldest first, across resets.
    pub fn history(&self) -> &[State] {
        &self.history
    }

    pub fn params(&self) -> &Arc<Params> {
        &self.params
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Every control in `[0, 1]`.
    pub fn action_space(&self) -> BoxSpace<ACTION_DIM> {
        BoxSpace::uniform(0.0, 1.0)
    }

    /// Every stock in `[0, inf)`.
    pub fn observation_space(&self) -> BoxSpace<STATE_DIM> {
        BoxSpace::uniform(0.0, Float::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn params() -> Params {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("parameters.yaml");
        Params::from_yaml_file(path).unwrap()
    }

    #[test]
    #[traced_test]
    fn reward_fault_is_logged_not_raised() {
        let mut env = EconomyEnv::new(params());
        let step = env.step(&Action::from([0.0; ACTION_DIM])).unwrap();

        assert_eq!(step.reward, 0.0);
        assert!(step.info.reward_fault.is_some());
        assert!(logs_contain("reward calculation failed"));
    }

    #[test]
    fn step_is_never_terminal() {
        let mut env = EconomyEnv::new(params());
        let action = Action::from([0.5, 0.5, 0.1, 0.5, 0.5, 0.5, 0.1]);
        for _ in 0..20 {
            assert!(!env.step(&action).unwrap().terminated);
        }
        assert_eq!(env.time(), 20);
    }
}
