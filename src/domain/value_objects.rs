// Domain value objects shared by every backend

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::solver_service::SolverError;

/// Relation of a constraint row to its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityType {
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    Greater,
    /// Less than or equal (≤)
    Less,
}

/// Class of optimization problem handed to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemClass {
    /// Linear program
    Lp,
    /// Mixed-integer linear program
    Milp,
    /// Quadratic program
    Qp,
    /// Mixed-integer quadratic program
    Miqp,
    /// General nonlinear program
    Np,
    /// Mixed-integer nonlinear program
    Minp,
}

impl ProblemClass {
    pub fn is_quadratic(&self) -> bool {
        matches!(self, ProblemClass::Qp | ProblemClass::Miqp)
    }

    pub fn is_nonlinear(&self) -> bool {
        matches!(self, ProblemClass::Np | ProblemClass::Minp)
    }
}

impl fmt::Display for ProblemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemClass::Lp => write!(f, "LP"),
            ProblemClass::Milp => write!(f, "MILP"),
            ProblemClass::Qp => write!(f, "QP"),
            ProblemClass::Miqp => write!(f, "MIQP"),
            ProblemClass::Np => write!(f, "NP"),
            ProblemClass::Minp => write!(f, "MINP"),
        }
    }
}

/// Outcome of a correctly executed solve
///
/// Software failures never show up here; they are reported as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Proven optimal solution
    Success,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely (also used for feasible,
    /// not-proven-optimal integer solutions unless configured otherwise)
    Unbounded,
    /// Feasible integer solution that was not proven optimal
    Feasible,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Success => write!(f, "Success"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::Feasible => write!(f, "Feasible (not proven optimal)"),
        }
    }
}

/// Solver backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// IBM CPLEX, the commercial flagship
    Cplex,
    /// LINDO, the alternate commercial backend for nonlinear problems
    Lindo,
    /// HiGHS, the default open-source backend
    Highs,
    /// COIN-OR CBC
    CoinCbc,
    /// SCIP, invoked as an external executable
    Scip,
}

impl SolverBackend {
    pub const ALL: [SolverBackend; 5] = [
        SolverBackend::Cplex,
        SolverBackend::Lindo,
        SolverBackend::Highs,
        SolverBackend::CoinCbc,
        SolverBackend::Scip,
    ];

    /// Short identifier as accepted by `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            SolverBackend::Cplex => "cplex",
            SolverBackend::Lindo => "lindo",
            SolverBackend::Highs => "highs",
            SolverBackend::CoinCbc => "coin_cbc",
            SolverBackend::Scip => "scip",
        }
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Cplex => write!(f, "CPLEX"),
            SolverBackend::Lindo => write!(f, "LINDO"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Scip => write!(f, "SCIP"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        SolverBackend::ALL
            .into_iter()
            .find(|backend| backend.id() == wanted)
            .ok_or_else(|| SolverError::UnrecognizedBackend(s.to_string()))
    }
}

/// What the selector does with a flagship request when no licence is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagshipPolicy {
    /// Keep the flagship whether or not the licence probe succeeds
    #[default]
    AlwaysPreferFlagship,
    /// Route LP to the open-source default and everything else to SCIP
    FallbackWithoutLicense,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_ids_parse_back() {
        for backend in SolverBackend::ALL {
            assert_eq!(backend.id().parse::<SolverBackend>().unwrap(), backend);
        }
        assert_eq!("COIN-CBC".parse::<SolverBackend>().unwrap(), SolverBackend::CoinCbc);
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = "gurobi".parse::<SolverBackend>().unwrap_err();
        assert!(matches!(err, SolverError::UnrecognizedBackend(ref id) if id == "gurobi"));
    }

    #[test]
    fn problem_class_families() {
        assert!(ProblemClass::Miqp.is_quadratic());
        assert!(!ProblemClass::Milp.is_quadratic());
        assert!(ProblemClass::Minp.is_nonlinear());
        assert_eq!(ProblemClass::Milp.to_string(), "MILP");
    }
}
