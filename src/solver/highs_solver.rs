// HiGHS engine
// Translates the native model into a HiGHS `RowProblem` on every solve.
// HiGHS keeps no basis between these calls; the warm-up check reports whether
// the last solve was for the current model revision. An "unbounded or
// infeasible" answer from presolve is settled by one solve without presolve.

use super::engine::{BasisTracker, EngineResult, LpEngine, NativeStatus, SolveFault};
use super::native::{ColumnKind, Direction, NativeModel};
use super::simplex_solver::SimplexSolver;
use crate::domain::SolverBackend;
use crate::infrastructure::SolverSettings;
use highs::{HighsModelStatus, Model, RowProblem, Sense, SolvedModel};
use tracing::{debug, trace};

/// Default open-source backend
pub type HighsSolver = SimplexSolver<HighsEngine>;

impl HighsSolver {
    pub fn highs(settings: &SolverSettings) -> Self {
        SimplexSolver::new(SolverBackend::Highs, HighsEngine::new(), settings)
    }
}

pub struct HighsEngine {
    basis: BasisTracker,
    lp: EngineResult,
    mip: EngineResult,
}

impl HighsEngine {
    pub fn new() -> Self {
        Self {
            basis: BasisTracker::default(),
            lp: EngineResult::without_solution(NativeStatus::Undefined),
            mip: EngineResult::without_solution(NativeStatus::Undefined),
        }
    }

    fn build(model: &NativeModel, integer: bool) -> Model {
        let mut pb = RowProblem::default();
        let mut cols = Vec::with_capacity(model.num_cols());

        for column in model.columns() {
            let (lower, upper) = column.bounds();
            let col = if integer && column.kind == ColumnKind::Integer {
                pb.add_integer_column(column.objective, lower..=upper)
            } else {
                pb.add_column(column.objective, lower..=upper)
            };
            cols.push(col);
        }

        for row in model.rows() {
            let (lower, upper) = row.bounds();
            let terms: Vec<_> = row
                .coefficients
                .iter()
                .map(|&(j, coefficient)| (cols[j - 1], coefficient))
                .collect();
            pb.add_row(lower..=upper, &terms);
        }

        let sense = match model.direction() {
            Direction::Maximize => Sense::Maximise,
            Direction::Minimize => Sense::Minimise,
        };
        let mut highs_model = pb.optimise(sense);
        highs_model.make_quiet();
        highs_model
    }

    fn solve(model: &NativeModel, integer: bool) -> Result<EngineResult, SolveFault> {
        let mut solved = Self::run(Self::build(model, integer))?;

        // Presolve may stop at "unbounded or infeasible"; without it the
        // solver settles which one.
        if matches!(solved.status(), HighsModelStatus::UnboundedOrInfeasible) {
            debug!(component = "highs", integer, "Re-solving without presolve");
            let mut retry = Self::build(model, integer);
            retry.set_option("presolve", "off");
            solved = Self::run(retry)?;
        }

        let status = match solved.status() {
            HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => NativeStatus::Optimal,
            HighsModelStatus::Infeasible => NativeStatus::NoFeasible,
            HighsModelStatus::Unbounded => NativeStatus::Unbounded,
            HighsModelStatus::UnboundedOrInfeasible => NativeStatus::Undefined,
            HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit => {
                NativeStatus::Feasible
            }
            other => NativeStatus::Other(format!("{other:?}")),
        };
        trace!(component = "highs", integer, status = %status, "HiGHS solve returned");

        if status != NativeStatus::Optimal {
            return Ok(EngineResult::without_solution(status));
        }
        let columns = solved.get_solution().columns().to_vec();
        Ok(EngineResult {
            status,
            objective: model.objective_value(&columns),
            columns,
        })
    }

    fn run(highs_model: Model) -> Result<SolvedModel, SolveFault> {
        highs_model
            .try_solve()
            .map_err(|status| SolveFault::Failed(format!("HiGHS run failed: {status:?}")))
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LpEngine for HighsEngine {
    fn warm_up(&mut self, model: &NativeModel) -> Result<(), SolveFault> {
        self.basis.check(model)
    }

    fn advanced_basis(&mut self, model: &NativeModel) {
        self.basis.rebuild(model);
    }

    fn simplex(&mut self, model: &NativeModel) -> Result<(), SolveFault> {
        // HiGHS builds its own starting basis, so simplex never reports an invalid one.
        self.lp = Self::solve(model, false)?;
        self.basis.rebuild(model);
        Ok(())
    }

    fn intopt(&mut self, model: &NativeModel) -> Result<(), SolveFault> {
        self.mip = Self::solve(model, true)?;
        Ok(())
    }

    fn lp_status(&self) -> NativeStatus {
        self.lp.status.clone()
    }

    fn mip_status(&self) -> NativeStatus {
        self.mip.status.clone()
    }

    fn lp_objective(&self) -> f64 {
        self.lp.objective
    }

    fn mip_objective(&self) -> f64 {
        self.mip.objective
    }

    fn lp_column(&self, j: usize) -> f64 {
        self.lp.column(j)
    }

    fn mip_column(&self, j: usize) -> f64 {
        self.mip.column(j)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        EntityRegistry, EqualityType, Equation, ProblemClass, SolutionStatus, SolverAdapter,
        Variable,
    };

    fn scenario(rhs_type: EqualityType, rhs: f64, bounds: [(f64, f64); 2]) -> HighsSolver {
        let mut solver = HighsSolver::highs(&SolverSettings::default());
        solver.initialize().unwrap();
        for (i, (lower, upper)) in bounds.into_iter().enumerate() {
            solver
                .load_variable(
                    &Variable::continuous(i, format!("x{i}")).with_bounds(lower, upper),
                    false,
                    false,
                )
                .unwrap();
        }
        solver
            .add_constraint(&Equation::new(0, rhs_type, rhs).with_terms([(0, 1.0), (1, 1.0)]))
            .unwrap();
        solver
            .load_objective(&Equation::objective().with_terms([(0, 1.0), (1, 1.0)]), true)
            .unwrap();
        solver
    }

    #[test]
    fn bounded_lp_is_solved_to_optimality() {
        let mut solver = scenario(EqualityType::Less, 12.0, [(0.0, 10.0), (2.0, 2.0)]);
        let solution = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Success);
        assert!((solution.objective - 12.0).abs() < 1e-6);
        assert!((solution.values[0] - 10.0).abs() < 1e-6);
        assert!((solution.values[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_variables_cannot_reach_rhs() {
        let mut solver = scenario(EqualityType::Greater, 20.0, [(5.0, 5.0), (7.0, 7.0)]);
        let solution = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn solve_leaves_basis_valid_for_model() {
        let mut solver = scenario(EqualityType::Less, 12.0, [(0.0, 10.0), (2.0, 2.0)]);
        solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        let model = solver.workspace().model().unwrap();
        assert!(solver.engine().basis.check(model).is_ok());
    }

    #[test]
    fn integer_search_rounds_down_fractional_optimum() {
        let mut solver = HighsSolver::highs(&SolverSettings::default());
        solver.initialize().unwrap();
        solver
            .load_variable(&Variable::continuous(0, "n").with_bounds(0.0, 10.0).integer(), false, false)
            .unwrap();
        solver
            .add_constraint(&Equation::new(0, EqualityType::Less, 7.0).with_term(0, 2.0))
            .unwrap();
        solver
            .load_objective(&Equation::objective().with_term(0, 1.0), true)
            .unwrap();

        let solution = solver
            .run_solver(ProblemClass::Milp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Success);
        assert!((solution.values[0] - 3.0).abs() < 1e-6);
        assert!((solver.engine().lp_column(1) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn unbounded_lp_is_not_reported_infeasible() {
        // max x0 subject to x0 - x1 >= 1, both non-negative
        let mut solver = HighsSolver::highs(&SolverSettings::default());
        solver.initialize().unwrap();
        for i in 0..2 {
            solver
                .load_variable(&Variable::continuous(i, ""), false, false)
                .unwrap();
        }
        solver
            .add_constraint(
                &Equation::new(0, EqualityType::Greater, 1.0).with_terms([(0, 1.0), (1, -1.0)]),
            )
            .unwrap();
        solver
            .load_objective(&Equation::objective().with_term(0, 1.0), true)
            .unwrap();

        let solution = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Unbounded);
    }
}
