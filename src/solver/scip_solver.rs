// SCIP adapter
// Model building is shared with the simplex backends; solving writes a
// settings file and an LP dump, runs the SCIP executable synchronously and
// parses what it printed.

use super::scip_output::{ResultParser, ScipOutputParser};
use super::workspace::LpWorkspace;
use crate::domain::{
    EntityRegistry, Equation, ProblemClass, Result, Solution, SolverAdapter, SolverBackend,
    SolverError, Variable,
};
use crate::infrastructure::{SolverSettings, SCIP_FEASIBILITY_TOLERANCE};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

const SETTINGS_FILE: &str = "ScipSettings.txt";
const PROBLEM_FILE: &str = "Problem.lp";
const OUTPUT_FILE: &str = "ScipOutput.out";

pub struct ScipSolver {
    workspace: LpWorkspace,
    settings: SolverSettings,
    parser: Box<dyn ResultParser>,
    /// Sequence number of the next problem snapshot written by `run_solver`
    runs: u32,
}

impl ScipSolver {
    pub fn new(settings: &SolverSettings) -> Self {
        let parser = ScipOutputParser::new(settings.suboptimal_status());
        Self::with_parser(settings, Box::new(parser))
    }

    pub fn with_parser(settings: &SolverSettings, parser: Box<dyn ResultParser>) -> Self {
        Self {
            workspace: LpWorkspace::new(SolverBackend::Scip),
            settings: settings.clone(),
            parser,
            runs: 0,
        }
    }

    /// Executable under the install path if present, else the bare command
    pub fn executable(&self) -> PathBuf {
        let installed = self.settings.program_path.join(&self.settings.scip_executable);
        if installed.is_file() {
            installed
        } else {
            PathBuf::from(&self.settings.scip_executable)
        }
    }

    fn write_settings(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|e| SolverError::io(path, e))?;
        write!(
            file,
            "limits/time = {}\nlimits/memory = {}\nnumerics/feastol = {:.9}\n",
            self.settings.time_limit_secs,
            self.settings.memory_limit_mb,
            SCIP_FEASIBILITY_TOLERANCE
        )
        .map_err(|e| SolverError::io(path, e))
    }
}

impl SolverAdapter for ScipSolver {
    fn backend(&self) -> SolverBackend {
        SolverBackend::Scip
    }

    fn initialize(&mut self) -> Result<()> {
        self.workspace.initialize()
    }

    fn clear(&mut self) -> Result<()> {
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

    fn run_solver(&mut self, class: ProblemClass, registry: &EntityRegistry) -> Result<Solution> {
        if !matches!(class, ProblemClass::Lp | ProblemClass::Milp) {
            return Err(SolverError::UnsupportedProblemClass {
                backend: SolverBackend::Scip,
                class,
            });
        }
        self.workspace.require_model("run solver")?;

        let dir = self.settings.output_dir.clone();
        std::fs::create_dir_all(&dir).map_err(|e| SolverError::io(&dir, e))?;

        let settings_path = dir.join(SETTINGS_FILE);
        self.write_settings(&settings_path)?;

        let sequence = self.runs;
        self.runs += 1;
        self.workspace.write_dump(&dir, PROBLEM_FILE, sequence)?;

        let output_path = dir.join(OUTPUT_FILE);
        let output = File::create(&output_path).map_err(|e| SolverError::io(&output_path, e))?;
        let executable = self.executable();
        debug!(
            component = "scip",
            operation = "spawn",
            executable = %executable.display(),
            "Running SCIP"
        );

        // Only the parsed output decides success; the exit code is not checked.
        let exit = Command::new(&executable)
            .arg("-s")
            .arg(&settings_path)
            .arg("-f")
            .arg(dir.join(PROBLEM_FILE))
            .stdout(Stdio::from(output))
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                SolverError::ExecutionFailed(format!(
                    "could not run {}: {e}",
                    executable.display()
                ))
            })?;
        debug!(component = "scip", exit = ?exit.code(), "SCIP exited");

        let model = self.workspace.require_model("run solver")?;
        let solution = self.parser.parse(&output_path, model, registry)?;
        info!(
            component = "solver",
            operation = "run_solver",
            backend = %SolverBackend::Scip,
            class = %class,
            status = %solution.status,
            objective = solution.objective,
            "Solve finished"
        );
        Ok(solution)
    }

    fn print_model(&mut self, sequence: u32) -> Result<()> {
        self.workspace
            .write_dump(&self.settings.output_dir, &self.settings.lp_filename, sequence)
    }

    fn model_dimensions(&self) -> Option<(usize, usize)> {
        self.workspace.dimensions()
    }
}
