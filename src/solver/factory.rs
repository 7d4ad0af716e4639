use crate::domain::{Result, SolverAdapter, SolverBackend, SolverError};
use crate::infrastructure::SolverSettings;
use crate::solver::ScipSolver;
use tracing::debug;

/// Factory for creating adapters based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create the adapter for a specific backend
    ///
    /// Backends compiled out of this build, and the commercial backends that
    /// have no bundled binding, report `SolverNotAvailable`.
    pub fn create_from_backend(
        backend: SolverBackend,
        settings: &SolverSettings,
    ) -> Result<Box<dyn SolverAdapter>> {
        debug!(component = "factory", backend = %backend, "Creating adapter");
        match backend {
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Box::new(crate::solver::HighsSolver::highs(settings))),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => Ok(Box::new(crate::solver::CbcSolver::coin_cbc(settings))),
            SolverBackend::Scip => Ok(Box::new(ScipSolver::new(settings))),
            other => Err(SolverError::SolverNotAvailable(format!(
                "{other} is not built into this binary"
            ))),
        }
    }

    /// Backends `create_from_backend` can build
    pub fn available_backends() -> Vec<SolverBackend> {
        SolverBackend::ALL
            .into_iter()
            .filter(|&backend| Self::is_available(backend))
            .collect()
    }

    pub fn is_available(backend: SolverBackend) -> bool {
        match backend {
            SolverBackend::Highs => cfg!(feature = "highs"),
            SolverBackend::CoinCbc => cfg!(feature = "coin_cbc"),
            SolverBackend::Scip => true,
            SolverBackend::Cplex | SolverBackend::Lindo => false,
        }
    }
}
