#![cfg(feature = "highs")]

use lpdispatch::{
    EqualityType, Equation, ProblemClass, Session, SolutionStatus, SolverBackend, SolverError,
    SolverSettings, Variable,
};

const HIGHS: SolverBackend = SolverBackend::Highs;

fn session_with(bounds: [(f64, f64); 2], constraint: Equation) -> Session {
    let mut session = Session::new(SolverSettings::default());
    session.initialize(HIGHS).unwrap();
    for (i, (lower, upper)) in bounds.into_iter().enumerate() {
        session
            .load_variable(
                HIGHS,
                &Variable::continuous(i, format!("x{i}")).with_bounds(lower, upper),
                false,
                false,
            )
            .unwrap();
    }
    session.add_constraint(HIGHS, &constraint).unwrap();
    session
        .load_objective(
            HIGHS,
            &Equation::objective().with_terms([(0, 1.0), (1, 1.0)]),
            true,
        )
        .unwrap();
    session
}

#[test]
fn bounded_lp_reaches_constraint() {
    let mut session = session_with(
        [(0.0, 10.0), (2.0, 2.0)],
        Equation::new(0, EqualityType::Less, 12.0).with_terms([(0, 1.0), (1, 1.0)]),
    );
    let solution = session.solve(HIGHS, ProblemClass::Lp).unwrap();

    assert_eq!(solution.status, SolutionStatus::Success);
    assert!((solution.objective - 12.0).abs() < 1e-6);
    assert_eq!(solution.values.len(), session.registry().size());
    assert!((solution.values[0] - 10.0).abs() < 1e-6);
    assert!((solution.values[1] - 2.0).abs() < 1e-6);
}

#[test]
fn fixed_variables_below_rhs_are_infeasible() {
    let mut session = session_with(
        [(5.0, 5.0), (7.0, 7.0)],
        Equation::new(0, EqualityType::Greater, 20.0).with_terms([(0, 1.0), (1, 1.0)]),
    );
    let solution = session.solve(HIGHS, ProblemClass::Lp).unwrap();
    assert_eq!(solution.status, SolutionStatus::Infeasible);
}

#[test]
fn milp_relaxation_and_integer_search() {
    let mut session = Session::new(SolverSettings::default());
    session.initialize(HIGHS).unwrap();
    session
        .load_variable(HIGHS, &Variable::binary(0, "on"), false, false)
        .unwrap();
    session
        .load_variable(
            HIGHS,
            &Variable::continuous(1, "level").with_bounds(0.0, 4.0),
            false,
            false,
        )
        .unwrap();
    // level <= 4 * on
    session
        .add_constraint(
            HIGHS,
            &Equation::new(0, EqualityType::Less, 0.0).with_terms([(1, 1.0), (0, -4.0)]),
        )
        .unwrap();
    session
        .load_objective(
            HIGHS,
            &Equation::objective().with_terms([(1, 3.0), (0, -5.0)]),
            true,
        )
        .unwrap();

    let solution = session.solve(HIGHS, ProblemClass::Milp).unwrap();
    assert_eq!(solution.status, SolutionStatus::Success);
    assert!((solution.objective - 7.0).abs() < 1e-6);
    assert!((solution.values[0] - 1.0).abs() < 1e-6);
}

#[test]
fn repeated_solves_reuse_the_model() {
    let mut session = session_with(
        [(0.0, 10.0), (2.0, 2.0)],
        Equation::new(0, EqualityType::Less, 12.0).with_terms([(0, 1.0), (1, 1.0)]),
    );
    let first = session.solve(HIGHS, ProblemClass::Lp).unwrap();

    session
        .add_constraint(
            HIGHS,
            &Equation::new(1, EqualityType::Less, 4.0).with_term(0, 1.0),
        )
        .unwrap();
    let second = session.solve(HIGHS, ProblemClass::Lp).unwrap();

    assert!((first.objective - 12.0).abs() < 1e-6);
    assert!((second.objective - 6.0).abs() < 1e-6);
    assert_eq!(session.model_dimensions(HIGHS), Some((2, 2)));
}

#[test]
fn clear_then_initialize_twice() {
    let mut session = Session::new(SolverSettings::default());
    session.reset(HIGHS).unwrap();
    session.initialize(HIGHS).unwrap();
    session.initialize(HIGHS).unwrap();
    assert_eq!(session.model_dimensions(HIGHS), Some((0, 0)));
}

#[test]
fn constraint_before_variable_fails_without_row() {
    let mut session = Session::new(SolverSettings::default());
    session.initialize(HIGHS).unwrap();
    let err = session
        .add_constraint(
            HIGHS,
            &Equation::new(0, EqualityType::Less, 1.0).with_term(0, 1.0),
        )
        .unwrap_err();
    assert!(matches!(err, SolverError::UnknownVariable { .. }));
    assert_eq!(session.model_dimensions(HIGHS), Some((0, 0)));
}

#[test]
fn unbounded_lp_is_reported_unbounded() {
    let mut session = Session::new(SolverSettings::default());
    session.initialize(HIGHS).unwrap();
    for i in 0..2 {
        session
            .load_variable(HIGHS, &Variable::continuous(i, format!("x{i}")), false, false)
            .unwrap();
    }
    session
        .add_constraint(
            HIGHS,
            &Equation::new(0, EqualityType::Greater, 1.0).with_terms([(0, 1.0), (1, -1.0)]),
        )
        .unwrap();
    session
        .load_objective(HIGHS, &Equation::objective().with_term(0, 1.0), true)
        .unwrap();

    let solution = session.solve(HIGHS, ProblemClass::Lp).unwrap();
    assert_eq!(solution.status, SolutionStatus::Unbounded);
}
