//! Backend-agnostic LP/MILP model building and solver dispatch.
//!
//! A [`Session`] routes variable, objective and constraint loading to the
//! adapter of the chosen backend, keeps the entity registry in step, and
//! returns every solve as a [`Solution`] whose status is one of success,
//! infeasible, unbounded or (optionally) feasible.

// Domain layer: Business logic and rules
pub mod domain;

// Application layer: Dispatch across backends
pub mod application;

// Infrastructure layer: Configuration and logging
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverAdapter
pub mod solver;

// Re-export commonly used types
pub use domain::{
    select_solver, EntityRegistry, EqualityType, Equation, FlagshipPolicy, LicenseProbe,
    ProblemClass, Solution, SolutionStatus, SolverAdapter, SolverBackend, SolverError, Variable,
};

pub use application::Session;

pub use infrastructure::{ConfigError, LoggingConfig, SolverSettings};

pub use solver::{ScipSolver, SimplexSolver, SolverFactory};

#[cfg(feature = "coin_cbc")]
pub use solver::CbcSolver;

#[cfg(feature = "highs")]
pub use solver::HighsSolver;
