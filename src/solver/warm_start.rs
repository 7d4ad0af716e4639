// Warm-start retry controller for the simplex-style backends

use super::engine::{LpEngine, SolveFault};
use super::native::NativeModel;
use crate::domain::{Result, SolverBackend, SolverError};
use tracing::{debug, warn};

fn fatal(backend: SolverBackend, stage: &str, fault: SolveFault) -> SolverError {
    SolverError::ExecutionFailed(format!("{backend} {stage} terminated: {fault}"))
}

/// Continuous solve with basis recovery
///
/// An unusable basis is replaced by an advanced one before solving. If the
/// solve still reports an invalid basis, the basis is rebuilt and the solve
/// retried once; any other termination is fatal.
pub fn solve_continuous<E: LpEngine>(
    backend: SolverBackend,
    engine: &mut E,
    model: &NativeModel,
) -> Result<()> {
    if engine.warm_up(model).is_err() {
        debug!(
            component = "warm_start",
            backend = %backend,
            "Basis not usable, building advanced basis"
        );
        engine.advanced_basis(model);
    }

    match engine.simplex(model) {
        Ok(()) => Ok(()),
        Err(SolveFault::InvalidBasis) => {
            warn!(
                component = "warm_start",
                backend = %backend,
                "Simplex rejected the basis, rebuilding and retrying once"
            );
            engine.advanced_basis(model);
            engine
                .simplex(model)
                .map_err(|fault| fatal(backend, "simplex", fault))
        }
        Err(fault) => Err(fatal(backend, "simplex", fault)),
    }
}

/// Relaxation solve for warm-starting, then the integer search
pub fn solve_integer<E: LpEngine>(
    backend: SolverBackend,
    engine: &mut E,
    model: &NativeModel,
) -> Result<()> {
    engine
        .simplex(model)
        .map_err(|fault| fatal(backend, "relaxation", fault))?;
    engine
        .intopt(model)
        .map_err(|fault| fatal(backend, "integer search", fault))
}
