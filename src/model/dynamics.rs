//! Right-hand side of the five coupled stock equations.

use crate::{
    Float,
    model::{Action, Params, STATE_DIM, State},
    ode::ODE,
};

/// Instantaneous rate of change of every stock.
///
/// Pure and total: `time` does not enter the equations, and singular inputs
/// (a resource stock at or below zero under the extraction-cost term, a
/// negative base under a fractional power) yield non-finite rates rather
/// than a panic. The returned [`State`] holds derivatives, not stocks.
pub fn rates(state: &State, _time: Float, control: &Action, params: &Params) -> State {
    let State {
        capital,
        resource,
        pollution,
        debt,
        green_capital,
    } = *state;
    let p = params;

    let output = p.output_scale * (control.output_share * green_capital).powf(p.green_output_elasticity);
    let extraction_cost = control.extraction
        * p.extraction_cost
        * resource.powf(-p.extraction_cost_elasticity);
    let green_financing = control.green_financing * green_capital;

    let capital_rate = output * (1.0 - p.capital_tax_rate)
        - control.consumption
        - control.energy_expenditure
        - (p.capital_depreciation + p.population_growth) * capital
        - extraction_cost;

    let resource_rate = -control.extraction;

    let pollution_rate = p.emission_intensity * control.extraction
        - p.pollution_decay * (pollution - p.natural_ceiling_factor * p.pollution_floor)
        - p.abatement_efficiency
            * (control.abatement_share * green_capital).powf(p.abatement_elasticity);

    let debt_rate = (p.interest_rate - p.population_growth) * debt
        - p.energy_debt_share * control.energy_expenditure
        - output * p.capital_tax_rate
        + green_financing;

    let green_rate = p.green_investment_share * control.energy_expenditure
        - (p.green_depreciation + p.population_growth) * green_capital
        + green_financing;

    State {
        capital: capital_rate,
        resource: resource_rate,
        pollution: pollution_rate,
        debt: debt_rate,
        green_capital: green_rate,
    }
}

/// The model as an [`ODE`] with the control held fixed over the solve.
#[derive(Debug, Clone, Copy)]
pub struct Dynamics<'a> {
    params: &'a Params,
    control: Action,
}

impl<'a> Dynamics<'a> {
    pub fn new(params: &'a Params, control: Action) -> Self {
        Self { params, control }
    }
}

impl ODE for Dynamics<'_> {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]) {
        let rates = rates(&State::from_slice(y), x, &self.control, self.params);
        dydx[..STATE_DIM].copy_from_slice(&rates.to_array());
    }
}
