// Solver adapters module

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
pub mod engine;
pub mod factory;
#[cfg(feature = "highs")]
pub mod highs_solver;
pub mod lp_format;
pub mod native;
pub mod normalizer;
pub mod scip_output;
pub mod scip_solver;
pub mod simplex_solver;
pub mod warm_start;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::{CbcEngine, CbcSolver};
pub use engine::{LpEngine, NativeStatus, SolveFault};
pub use factory::SolverFactory;
#[cfg(feature = "highs")]
pub use highs_solver::{HighsEngine, HighsSolver};
pub use native::NativeModel;
pub use scip_output::{ResultParser, ScipOutputParser};
pub use scip_solver::ScipSolver;
pub use simplex_solver::SimplexSolver;
pub use workspace::LpWorkspace;
