// Simplex-style adapter
// Builds the native model through `LpWorkspace` and solves it in-process with
// an `LpEngine`. HiGHS and CBC are both driven through this adapter.

use super::engine::LpEngine;
use super::normalizer::{normalize_continuous, normalize_integer};
use super::warm_start::{solve_continuous, solve_integer};
use super::workspace::LpWorkspace;
use crate::domain::{
    EntityRegistry, Equation, ProblemClass, Result, Solution, SolutionStatus, SolverAdapter,
    SolverBackend, SolverError, Variable,
};
use crate::infrastructure::SolverSettings;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

pub struct SimplexSolver<E> {
    backend: SolverBackend,
    workspace: LpWorkspace,
    engine: E,
    output_dir: PathBuf,
    lp_filename: String,
    suboptimal_status: SolutionStatus,
}

impl<E: LpEngine> SimplexSolver<E> {
    pub fn new(backend: SolverBackend, engine: E, settings: &SolverSettings) -> Self {
        Self {
            backend,
            workspace: LpWorkspace::new(backend),
            engine,
            output_dir: settings.output_dir.clone(),
            lp_filename: settings.lp_filename.clone(),
            suboptimal_status: settings.suboptimal_status(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn workspace(&self) -> &LpWorkspace {
        &self.workspace
    }
}

impl<E: LpEngine> SolverAdapter for SimplexSolver<E> {
    fn backend(&self) -> SolverBackend {
        self.backend
    }

    fn initialize(&mut self) -> Result<()> {
        self.engine.reset();
        self.workspace.initialize()
    }

    fn clear(&mut self) -> Result<()> {
        self.engine.reset();
        self.workspace.clear()
    }

    fn load_variable(
        &mut self,
        variable: &Variable,
        relax_integer: bool,
        use_tight_bounds: bool,
    ) -> Result<()> {
        self.workspace
            .load_variable(variable, relax_integer, use_tight_bounds)
    }

    fn load_objective(&mut self, objective: &Equation, maximize: bool) -> Result<()> {
        self.workspace.load_objective(objective, maximize)
    }

    fn add_constraint(&mut self, constraint: &Equation) -> Result<()> {
        self.workspace.add_constraint(constraint)
    }

    fn run_solver(&mut self, class: ProblemClass, _registry: &EntityRegistry) -> Result<Solution> {
        let model = self.workspace.require_model("run solver")?;
        let columns = model.num_cols();
        let start_time = Instant::now();

        let solution = match class {
            ProblemClass::Milp => {
                solve_integer(self.backend, &mut self.engine, model)?;
                normalize_integer(self.backend, &self.engine, columns, self.suboptimal_status)?
            }
            ProblemClass::Lp => {
                solve_continuous(self.backend, &mut self.engine, model)?;
                normalize_continuous(self.backend, &self.engine, columns)?
            }
            class => {
                return Err(SolverError::UnsupportedProblemClass {
                    backend: self.backend,
                    class,
                })
            }
        };

        info!(
            component = "solver",
            operation = "run_solver",
            backend = %self.backend,
            class = %class,
            status = %solution.status,
            objective = solution.objective,
            solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "Solve finished"
        );
        Ok(solution)
    }

    fn print_model(&mut self, sequence: u32) -> Result<()> {
        self.workspace
            .write_dump(&self.output_dir, &self.lp_filename, sequence)
    }

    fn model_dimensions(&self) -> Option<(usize, usize)> {
        self.workspace.dimensions()
    }
}
