//! The environmental-economic model: state and control vectors, parameters,
//! the ODE right-hand side and the welfare reward.

pub mod dynamics;
pub mod params;
pub mod reward;

pub use params::Params;

use crate::Float;

/// Number of stocks in [`State`].
pub const STATE_DIM: usize = 5;
/// Number of controls in [`Action`].
pub const ACTION_DIM: usize = 7;

/// The five stocks describing the system at one point in time.
///
/// Conceptually non-negative, but nothing here enforces it: a trajectory
/// driven into a degenerate region may carry negative or non-finite stocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Physical capital `K`.
    pub capital: Float,
    /// Depletable resource stock `R`.
    pub resource: Float,
    /// Pollution concentration `M`.
    pub pollution: Float,
    /// Public debt `b`.
    pub debt: Float,
    /// Green capital / infrastructure `g`.
    pub green_capital: Float,
}

impl State {
    /// State every episode starts from.
    pub const INITIAL: State = State {
        capital: 1000.0,
        resource: 500.0,
        pollution: 400.0,
        debt: 300.0,
        green_capital: 200.0,
    };

    pub fn to_array(self) -> [Float; STATE_DIM] {
        [
            self.capital,
            self.resource,
            self.pollution,
            self.debt,
            self.green_capital,
        ]
    }

    /// Read the first [`STATE_DIM`] entries of a solver buffer.
    pub(crate) fn from_slice(y: &[Float]) -> Self {
        State {
            capital: y[0],
            resource: y[1],
            pollution: y[2],
            debt: y[3],
            green_capital: y[4],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[Float; STATE_DIM]> for State {
    fn from(y: [Float; STATE_DIM]) -> Self {
        State::from_slice(&y)
    }
}

impl From<State> for [Float; STATE_DIM] {
    fn from(state: State) -> Self {
        state.to_array()
    }
}

/// The seven policy levers applied for one unit of time.
///
/// Each component is meant to lie in `[0, 1]` (see
/// [`crate::env::EconomyEnv::action_space`]) but the model accepts any real
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    /// Consumption `C`.
    pub consumption: Float,
    /// Energy / abatement expenditure `eP`.
    pub energy_expenditure: Float,
    /// Resource extraction rate `u`.
    pub extraction: Float,
    /// Green-capital weight in production `nu_1`.
    pub output_share: Float,
    /// Green-capital weight in welfare `nu_2`.
    pub welfare_share: Float,
    /// Green-capital weight in abatement `nu_3`.
    pub abatement_share: Float,
    /// Debt-financed green investment rate `varsigma_k`.
    pub green_financing: Float,
}

impl Action {
    pub fn to_array(self) -> [Float; ACTION_DIM] {
        [
            self.consumption,
            self.energy_expenditure,
            self.extraction,
            self.output_share,
            self.welfare_share,
            self.abatement_share,
            self.green_financing,
        ]
    }
}

impl From<[Float; ACTION_DIM]> for Action {
    fn from(u: [Float; ACTION_DIM]) -> Self {
        let [consumption, energy_expenditure, extraction, output_share, welfare_share, abatement_share, green_financing] =
            u;
        Action {
            consumption,
            energy_expenditure,
            extraction,
            output_share,
            welfare_share,
            abatement_share,
            green_financing,
        }
    }
}

impl From<Action> for [Float; ACTION_DIM] {
    fn from(action: Action) -> Self {
        action.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_follow_declared_order() {
        assert_eq!(State::INITIAL.to_array(), [1000.0, 500.0, 400.0, 300.0, 200.0]);
        let action = Action::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(action.extraction, 3.0);
        assert_eq!(action.green_financing, 7.0);
        assert_eq!(action.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn non_finite_stock_is_detected() {
        let mut state = State::INITIAL;
        assert!(state.is_finite());
        state.pollution = Float::NAN;
        assert!(!state.is_finite());
    }
}
