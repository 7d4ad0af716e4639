// Backend selection policy

use super::value_objects::{FlagshipPolicy, ProblemClass, SolverBackend};
use std::path::Path;

/// Result of looking for the flagship licence file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseProbe {
    pub found: bool,
}

impl LicenseProbe {
    /// Licence counts as found when `var` names an existing file
    pub fn from_env(var: &str) -> Self {
        let found = std::env::var_os(var).is_some_and(|path| Path::new(&path).exists());
        Self { found }
    }

    pub fn found() -> Self {
        Self { found: true }
    }

    pub fn missing() -> Self {
        Self { found: false }
    }
}

/// Decide which backend handles `class` when the caller asked for `current`
pub fn select_solver(
    class: ProblemClass,
    current: SolverBackend,
    license: LicenseProbe,
    policy: FlagshipPolicy,
) -> SolverBackend {
    if current == SolverBackend::Cplex {
        if license.found {
            return SolverBackend::Cplex;
        }
        return match policy {
            FlagshipPolicy::AlwaysPreferFlagship => SolverBackend::Cplex,
            FlagshipPolicy::FallbackWithoutLicense if class == ProblemClass::Lp => {
                SolverBackend::Highs
            }
            FlagshipPolicy::FallbackWithoutLicense => SolverBackend::Scip,
        };
    }

    if class.is_quadratic() {
        // Only the flagship expresses quadratic terms.
        SolverBackend::Cplex
    } else if class.is_nonlinear() {
        SolverBackend::Lindo
    } else {
        current
    }
}
