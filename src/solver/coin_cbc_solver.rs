// COIN-OR CBC engine via good_lp
// The native model is rebuilt as a good_lp problem on every solve. Like the
// HiGHS engine there is no basis handle, so the basis is tracked per revision.

use super::engine::{BasisTracker, EngineResult, LpEngine, NativeStatus, SolveFault};
use super::native::{BoundKind, ColumnKind, Direction, NativeModel};
use super::simplex_solver::SimplexSolver;
use crate::domain::SolverBackend;
use crate::infrastructure::SolverSettings;
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use tracing::trace;

pub type CbcSolver = SimplexSolver<CbcEngine>;

impl CbcSolver {
    pub fn coin_cbc(settings: &SolverSettings) -> Self {
        SimplexSolver::new(SolverBackend::CoinCbc, CbcEngine::new(), settings)
    }
}

pub struct CbcEngine {
    basis: BasisTracker,
    lp: EngineResult,
    mip: EngineResult,
}

impl CbcEngine {
    pub fn new() -> Self {
        Self {
            basis: BasisTracker::default(),
            lp: EngineResult::without_solution(NativeStatus::Undefined),
            mip: EngineResult::without_solution(NativeStatus::Undefined),
        }
    }

    fn solve(model: &NativeModel, integer: bool) -> Result<EngineResult, SolveFault> {
        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(model.num_cols());

        for column in model.columns() {
            let (lower, upper) = column.bounds();
            let definition = variable().min(lower).max(upper);
            let var = if integer && column.kind == ColumnKind::Integer {
                vars.add(definition.integer())
            } else {
                vars.add(definition)
            };
            lp_variables.push(var);
        }

        let mut objective: Expression = 0.into();
        for (column, &var) in model.columns().iter().zip(&lp_variables) {
            if column.objective != 0.0 {
                objective += column.objective * var;
            }
        }

        let unsolved = match model.direction() {
            Direction::Maximize => vars.maximise(objective),
            Direction::Minimize => vars.minimise(objective),
        };
        let mut lp_model = unsolved.using(coin_cbc::coin_cbc);

        for row in model.rows() {
            let mut lhs: Expression = 0.into();
            for &(j, coefficient) in &row.coefficients {
                lhs += coefficient * lp_variables[j - 1];
            }

            let (lower, upper) = row.bounds();
            lp_model = match row.bound_kind {
                BoundKind::Free => lp_model,
                BoundKind::Lower => lp_model.with(lhs.geq(lower)),
                BoundKind::Upper => lp_model.with(lhs.leq(upper)),
                BoundKind::Fixed => lp_model.with(lhs.eq(lower)),
                BoundKind::Double => lp_model.with(lhs.clone().geq(lower)).with(lhs.leq(upper)),
            };
        }

        let status = match lp_model.solve() {
            Ok(sol) => {
                let columns: Vec<f64> = lp_variables.iter().map(|&var| sol.value(var)).collect();
                trace!(component = "coin_cbc", integer, "CBC found an optimum");
                return Ok(EngineResult {
                    status: NativeStatus::Optimal,
                    objective: model.objective_value(&columns),
                    columns,
                });
            }
            Err(ResolutionError::Infeasible) => NativeStatus::NoFeasible,
            Err(ResolutionError::Unbounded) => NativeStatus::Unbounded,
            Err(e) => return Err(SolveFault::Failed(format!("CBC run failed: {e}"))),
        };
        trace!(component = "coin_cbc", integer, status = %status, "CBC solve returned");
        Ok(EngineResult::without_solution(status))
    }
}

impl Default for CbcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LpEngine for CbcEngine {
    fn warm_up(&mut self, model: &NativeModel) -> Result<(), SolveFault> {
        self.basis.check(model)
    }

    fn advanced_basis(&mut self, model: &NativeModel) {
        self.basis.rebuild(model);
    }

    fn simplex(&mut self, model: &NativeModel) -> Result<(), SolveFault> {
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
        self.basis.clear();
        self.lp = EngineResult::without_solution(NativeStatus::Undefined);
        self.mip = EngineResult::without_solution(NativeStatus::Undefined);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        EntityRegistry, EqualityType, Equation, ProblemClass, SolutionStatus, SolverAdapter,
        Variable,
    };

    fn two_column_problem(rhs_type: EqualityType, rhs: f64, second: (f64, f64)) -> CbcSolver {
        let mut solver = CbcSolver::coin_cbc(&SolverSettings::default());
        solver.initialize().unwrap();
        solver
            .load_variable(&Variable::continuous(0, "a").with_bounds(0.0, 10.0), false, false)
            .unwrap();
        solver
            .load_variable(
                &Variable::continuous(1, "b").with_bounds(second.0, second.1),
                false,
                false,
            )
            .unwrap();
        solver
            .add_constraint(&Equation::new(0, rhs_type, rhs).with_terms([(0, 1.0), (1, 1.0)]))
            .unwrap();
        solver
            .load_objective(&Equation::objective().with_terms([(0, 1.0), (1, 1.0)]), true)
            .unwrap();
        solver
    }

    #[test]
    fn solves_bounded_lp() {
        let mut solver = two_column_problem(EqualityType::Less, 12.0, (2.0, 2.0));
        let solution = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Success);
        assert!((solution.objective - 12.0).abs() < 1e-6);
        assert!((solution.values[0] - 10.0).abs() < 1e-6);
    }

    #[test]
    fn reports_infeasible_lp() {
        let mut solver = two_column_problem(EqualityType::Greater, 20.0, (7.0, 7.0));
        let solution = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn integer_columns_are_honoured_only_in_milp() {
        let mut solver = CbcSolver::coin_cbc(&SolverSettings::default());
        solver.initialize().unwrap();
        solver
            .load_variable(
                &Variable::continuous(0, "n").with_bounds(0.0, 10.0).integer(),
                false,
                false,
            )
            .unwrap();
        solver
            .add_constraint(&Equation::new(0, EqualityType::Less, 7.0).with_term(0, 2.0))
            .unwrap();
        solver
            .load_objective(&Equation::objective().with_term(0, 1.0), true)
            .unwrap();

        let milp = solver
            .run_solver(ProblemClass::Milp, &EntityRegistry::new())
            .unwrap();
        assert!((milp.values[0] - 3.0).abs() < 1e-6);

        let lp = solver
            .run_solver(ProblemClass::Lp, &EntityRegistry::new())
            .unwrap();
        assert!((lp.values[0] - 3.5).abs() < 1e-6);
    }

    #[test]
    fn reports_unbounded_lp() {
        // max a subject to a - b >= 1, a and b non-negative
        let mut solver = CbcSolver::coin_cbc(&SolverSettings::default());
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
