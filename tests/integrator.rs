use mpiam::{
    Action, Error, FiniteGuard, Float, Integrator, Method, ODE, Settings, SettingsError, State,
    Status,
};

mod common;
use common::{GOLDEN_STATE_1, assert_state_close, golden_action, reference_params};

struct Decay;

impl ODE for Decay {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        for i in 0..y.len() {
            dydx[i] = -y[i];
        }
    }
}

struct Blowup;

impl ODE for Blowup {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        dydx[0] = y[0] * y[0];
    }
}

#[test]
fn both_methods_solve_exponential_decay() {
    for method in [Method::Dopri5, Method::Rk23] {
        let integrator = Integrator::builder()
            .method(method)
            .rtol(1e-10)
            .atol(1e-10)
            .build();
        let mut y = [1.0, 2.0];
        let mut guard = FiniteGuard::new();
        let result = integrator.solve(&Decay, 0.0, 1.0, &mut y, &mut guard).unwrap();

        assert_eq!(result.status, Status::Success);
        assert!((result.x - 1.0).abs() < 1e-12);
        assert!((y[0] - (-1.0f64).exp()).abs() < 1e-8, "{method:?}: {}", y[0]);
        assert!((y[1] - 2.0 * (-1.0f64).exp()).abs() < 1e-8, "{method:?}: {}", y[1]);
        assert!(result.steps.accepted > 0);
        assert!(result.evals.ode > result.steps.accepted);
    }
}

#[test]
fn golden_step_with_default_integrator() {
    let params = reference_params();
    let next = Integrator::default()
        .advance(&State::INITIAL, &golden_action(), &params)
        .unwrap();
    assert_state_close(next.to_array(), GOLDEN_STATE_1, 1e-4);
}

#[test]
fn rk23_agrees_with_reference_at_tight_tolerance() {
    let params = reference_params();
    let integrator = Integrator::builder()
        .method(Method::Rk23)
        .rtol(1e-10)
        .atol(1e-10)
        .build();
    let next = integrator
        .advance(&State::INITIAL, &golden_action(), &params)
        .unwrap();
    assert_state_close(next.to_array(), GOLDEN_STATE_1, 1e-4);
}

#[test]
fn advance_does_not_touch_its_input() {
    let params = reference_params();
    let state = State::INITIAL;
    let _ = Integrator::default().advance(&state, &golden_action(), &params).unwrap();
    assert_eq!(state, State::INITIAL);
}

#[test]
fn singular_initial_condition_is_reported() {
    let params = reference_params();
    let mut state = State::INITIAL;
    state.resource = 0.0;
    let err = Integrator::default()
        .advance(&state, &golden_action(), &params)
        .unwrap_err();
    assert!(matches!(err, Error::NonFiniteRates { .. }), "{err}");
}

#[test]
fn running_into_the_singularity_is_an_error() {
    let params = reference_params();
    // Extraction exhausts a tiny resource stock well within the step.
    let mut state = State::INITIAL;
    state.resource = 0.05;
    let action = Action::from([0.5, 0.5, 1.0, 0.5, 0.5, 0.5, 0.5]);
    let err = Integrator::default()
        .advance(&state, &action, &params)
        .unwrap_err();
    assert!(
        matches!(err, Error::Integration { .. } | Error::NonFiniteState { .. }),
        "{err}"
    );
}

#[test]
fn finite_time_blowup_stops_the_solve() {
    // y' = y^2, y(0) = 1 blows up at x = 1.
    let integrator = Integrator::default();
    let mut y = [1.0];
    let mut guard = FiniteGuard::new();
    let result = integrator.solve(&Blowup, 0.0, 2.0, &mut y, &mut guard).unwrap();
    assert_ne!(result.status, Status::Success);
    assert!(result.x < 1.0 + 1e-6);
}

#[test]
fn invalid_settings_are_all_reported() {
    let params = reference_params();
    let integrator = Integrator::builder()
        .rtol(-1.0)
        .settings(
            Settings::builder()
                .safety_factor(1.5)
                .nmax(0)
                .beta(0.5)
                .build(),
        )
        .build();
    let err = integrator
        .advance(&State::INITIAL, &golden_action(), &params)
        .unwrap_err();
    match err {
        Error::Settings(errors) => {
            assert!(errors.contains(&SettingsError::InvalidTolerance("rtol")));
            assert!(errors.contains(&SettingsError::SafetyFactorOutOfRange(1.5)));
            assert!(errors.contains(&SettingsError::NMaxMustBePositive(0)));
            assert!(errors.contains(&SettingsError::BetaTooLarge(0.5)));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn step_budget_exhaustion_is_an_error() {
    let params = reference_params();
    let integrator = Integrator::builder()
        .rtol(1e-12)
        .atol(1e-12)
        .settings(Settings::builder().nmax(1).h0(1e-4).build())
        .build();
    let err = integrator
        .advance(&State::INITIAL, &golden_action(), &params)
        .unwrap_err();
    assert!(
        matches!(
            err,
            Error::Integration {
                status: Status::NeedLargerNMax,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn step_budget_counts_the_same_for_both_methods() {
    for method in [Method::Dopri5, Method::Rk23] {
        let integrator = Integrator::builder()
            .method(method)
            .rtol(1e-12)
            .atol(1e-12)
            .settings(Settings::builder().nmax(3).h0(1e-4).build())
            .build();
        let mut y = [1.0];
        let mut guard = FiniteGuard::new();
        let result = integrator.solve(&Decay, 0.0, 1.0, &mut y, &mut guard).unwrap();

        assert_eq!(result.status, Status::NeedLargerNMax, "{method:?}");
        assert_eq!(result.steps.total, 3, "{method:?}");
        assert!(result.x < 1.0, "{method:?}");
    }
}

#[test]
fn method_names_parse() {
    assert_eq!("dopri5".parse::<Method>().unwrap(), Method::Dopri5);
    assert_eq!("RK45".parse::<Method>().unwrap(), Method::Dopri5);
    assert_eq!("rk23".parse::<Method>().unwrap(), Method::Rk23);
    assert!(matches!("lsoda".parse::<Method>(), Err(Error::UnknownMethod(_))));
}
