// Backend adapter contract
// Every backend implements the same capability set so the dispatch layer can
// route model-building and solving calls without knowing which one is active.

use super::models::{Equation, Solution, Variable};
use super::registry::EntityRegistry;
use super::value_objects::{ProblemClass, SolverBackend};
use std::path::PathBuf;

/// Fatal software failures
///
/// Infeasible and unbounded models are not errors; they come back as a
/// `Solution` with the matching status.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("{backend}: cannot {operation} because no model is active")]
    NoActiveModel {
        backend: SolverBackend,
        operation: &'static str,
    },

    #[error("{backend} cannot accept quadratic terms in the {context}")]
    QuadraticUnsupported {
        backend: SolverBackend,
        context: &'static str,
    },

    #[error("variable index {index} in the {context} is out of range of the {columns} columns loaded")]
    UnknownVariable {
        index: usize,
        columns: usize,
        context: &'static str,
    },

    #[error("index {index} would leave a gap after {len} existing entries")]
    IndexGap { index: usize, len: usize },

    #[error("index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{backend} returned an unrecognized status: {status}")]
    UnrecognizedStatus {
        backend: SolverBackend,
        status: String,
    },

    #[error("Unrecognized solver backend: {0}")]
    UnrecognizedBackend(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("{backend} cannot handle {class} problems")]
    UnsupportedProblemClass {
        backend: SolverBackend,
        class: ProblemClass,
    },

    #[error("{backend} does not support {operation}")]
    Unsupported {
        backend: SolverBackend,
        operation: &'static str,
    },

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SolverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SolverError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Capability set implemented once per backend
///
/// Variables must be loaded before any objective or constraint that refers to
/// them. Implementations validate every index and feature before touching the
/// native model, so a rejected call leaves the model as it was.
pub trait SolverAdapter {
    /// Backend this adapter drives
    fn backend(&self) -> SolverBackend;

    /// Allocate a fresh native model, clearing any existing one first
    fn initialize(&mut self) -> Result<()>;

    /// Drop the native model if there is one
    fn clear(&mut self) -> Result<()>;

    fn load_variable(
        &mut self,
        variable: &Variable,
        relax_integer: bool,
        use_tight_bounds: bool,
    ) -> Result<()>;

    fn load_objective(&mut self, objective: &Equation, maximize: bool) -> Result<()>;

    fn add_constraint(&mut self, constraint: &Equation) -> Result<()>;

    fn remove_constraint(&mut self, _constraint: &Equation) -> Result<()> {
        Err(SolverError::Unsupported {
            backend: self.backend(),
            operation: "constraint removal",
        })
    }

    /// Solve the live model
    fn run_solver(&mut self, class: ProblemClass, registry: &EntityRegistry) -> Result<Solution>;

    /// Write the model to the canonical dump file and a numbered snapshot
    fn print_model(&mut self, sequence: u32) -> Result<()>;

    /// (columns, rows) of the live model, `None` when no model is active
    fn model_dimensions(&self) -> Option<(usize, usize)>;
}
