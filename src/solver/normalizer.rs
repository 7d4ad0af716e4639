// Solution normalizer: native status and results to a `Solution`

use super::engine::{LpEngine, NativeStatus};
use crate::domain::{Result, Solution, SolutionStatus, SolverBackend, SolverError};
use tracing::info;

/// Map the last continuous solve of `engine`
pub fn normalize_continuous<E: LpEngine>(
    backend: SolverBackend,
    engine: &E,
    columns: usize,
) -> Result<Solution> {
    match engine.lp_status() {
        NativeStatus::Infeasible | NativeStatus::NoFeasible | NativeStatus::Undefined => {
            info!(component = "normalizer", backend = %backend, "Model is infeasible");
            Ok(Solution::new(SolutionStatus::Infeasible))
        }
        NativeStatus::Feasible | NativeStatus::Unbounded => {
            info!(component = "normalizer", backend = %backend, "Model is unbounded");
            Ok(Solution::new(SolutionStatus::Unbounded))
        }
        NativeStatus::Optimal => {
            let values = (1..=columns).map(|j| engine.lp_column(j)).collect();
            Ok(Solution::success(engine.lp_objective(), values))
        }
        NativeStatus::Other(status) => Err(SolverError::UnrecognizedStatus { backend, status }),
    }
}

/// Map the last integer search of `engine`
///
/// A feasible solution that was not proven optimal is reported with
/// `suboptimal_status`; no values are attached to it.
pub fn normalize_integer<E: LpEngine>(
    backend: SolverBackend,
    engine: &E,
    columns: usize,
    suboptimal_status: SolutionStatus,
) -> Result<Solution> {
    match engine.mip_status() {
        NativeStatus::Undefined | NativeStatus::NoFeasible => {
            Ok(Solution::new(SolutionStatus::Infeasible))
        }
        NativeStatus::Feasible => Ok(Solution::new(suboptimal_status)),
        NativeStatus::Optimal => {
            let values = (1..=columns).map(|j| engine.mip_column(j)).collect();
            Ok(Solution::success(engine.mip_objective(), values))
        }
        status => Err(SolverError::UnrecognizedStatus {
            backend,
            status: status.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::ScriptedEngine;

    const B: SolverBackend = SolverBackend::Highs;

    fn lp(status: NativeStatus) -> Result<Solution> {
        let engine = ScriptedEngine::reporting(status, 12.0, vec![10.0, 2.0]);
        normalize_continuous(B, &engine, 2)
    }

    fn mip(status: NativeStatus) -> Result<Solution> {
        let engine = ScriptedEngine::reporting(status, 12.0, vec![10.0, 2.0]);
        normalize_integer(B, &engine, 2, SolutionStatus::Unbounded)
    }

    #[test]
    fn continuous_status_mapping() {
        for status in [
            NativeStatus::Infeasible,
            NativeStatus::NoFeasible,
            NativeStatus::Undefined,
        ] {
            assert_eq!(lp(status).unwrap().status, SolutionStatus::Infeasible);
        }
        for status in [NativeStatus::Feasible, NativeStatus::Unbounded] {
            assert_eq!(lp(status).unwrap().status, SolutionStatus::Unbounded);
        }
        let solution = lp(NativeStatus::Optimal).unwrap();
        assert_eq!(solution, Solution::success(12.0, vec![10.0, 2.0]));
    }

    #[test]
    fn integer_status_mapping() {
        assert_eq!(mip(NativeStatus::Undefined).unwrap().status, SolutionStatus::Infeasible);
        assert_eq!(mip(NativeStatus::NoFeasible).unwrap().status, SolutionStatus::Infeasible);
        assert_eq!(mip(NativeStatus::Feasible).unwrap().status, SolutionStatus::Unbounded);
        assert_eq!(
            mip(NativeStatus::Optimal).unwrap(),
            Solution::success(12.0, vec![10.0, 2.0])
        );
    }

    #[test]
    fn suboptimal_status_is_configurable() {
        let engine = ScriptedEngine::reporting(NativeStatus::Feasible, 3.0, vec![1.0]);
        let solution = normalize_integer(B, &engine, 1, SolutionStatus::Feasible).unwrap();
        assert_eq!(solution.status, SolutionStatus::Feasible);
        assert!(solution.values.is_empty());
    }

    #[test]
    fn unmapped_statuses_are_fatal() {
        let err = lp(NativeStatus::Other("ObjectiveBound".into())).unwrap_err();
        assert!(matches!(err, SolverError::UnrecognizedStatus { ref status, .. } if status == "ObjectiveBound"));

        // An integer search never reports plain infeasible or unbounded.
        assert!(mip(NativeStatus::Unbounded).is_err());
        assert!(mip(NativeStatus::Infeasible).is_err());
    }
}
