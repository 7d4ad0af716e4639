// Numeric seam between the simplex-style adapters and a solver library

use super::native::NativeModel;
use std::fmt;

/// Status a native library reports for its last LP or MIP solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeStatus {
    /// No solve yet, or the library could not decide
    Undefined,
    /// Feasible, not proven optimal
    Feasible,
    /// Current solution is infeasible
    Infeasible,
    /// Problem has no feasible solution
    NoFeasible,
    Optimal,
    Unbounded,
    /// Anything the adapters do not map
    Other(String),
}

impl fmt::Display for NativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeStatus::Undefined => write!(f, "undefined"),
            NativeStatus::Feasible => write!(f, "feasible"),
            NativeStatus::Infeasible => write!(f, "infeasible"),
            NativeStatus::NoFeasible => write!(f, "no feasible"),
            NativeStatus::Optimal => write!(f, "optimal"),
            NativeStatus::Unbounded => write!(f, "unbounded"),
            NativeStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

/// Non-zero termination of a native solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveFault {
    /// Starting basis is invalid; an advanced basis must be built first
    InvalidBasis,
    Failed(String),
}

impl fmt::Display for SolveFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveFault::InvalidBasis => write!(f, "invalid basis"),
            SolveFault::Failed(reason) => write!(f, "{reason}"),
        }
    }
}

/// Operations the simplex-style adapters need from a solver library
///
/// Column accessors are 1-based. Results refer to the most recent `simplex`
/// (LP) or `intopt` (MIP) call.
pub trait LpEngine {
    /// Check that the current basis is usable for `model`
    fn warm_up(&mut self, model: &NativeModel) -> Result<(), SolveFault>;

    /// Build a valid starting basis for `model`
    fn advanced_basis(&mut self, model: &NativeModel);

    /// Solve the continuous relaxation of `model`
    fn simplex(&mut self, model: &NativeModel) -> Result<(), SolveFault>;

    /// Run the integer search on `model`
    fn intopt(&mut self, model: &NativeModel) -> Result<(), SolveFault>;

    fn lp_status(&self) -> NativeStatus;
    fn mip_status(&self) -> NativeStatus;
    fn lp_objective(&self) -> f64;
    fn mip_objective(&self) -> f64;
    fn lp_column(&self, j: usize) -> f64;
    fn mip_column(&self, j: usize) -> f64;

    /// Forget results and basis, e.g. when the model is replaced
    fn reset(&mut self);
}

/// Results of one native solve, kept by the concrete engines
#[cfg_attr(not(any(feature = "highs", feature = "coin_cbc")), allow(dead_code))]
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EngineResult {
    pub status: NativeStatus,
    pub objective: f64,
    pub columns: Vec<f64>,
}

#[cfg_attr(not(any(feature = "highs", feature = "coin_cbc")), allow(dead_code))]
impl EngineResult {
    pub fn without_solution(status: NativeStatus) -> Self {
        Self {
            status,
            objective: 0.0,
            columns: Vec::new(),
        }
    }

    pub fn column(&self, j: usize) -> f64 {
        self.columns.get(j.wrapping_sub(1)).copied().unwrap_or(0.0)
    }
}

/// Basis bookkeeping shared by engines whose library has no basis handle:
/// a basis is valid only for the model revision it was built for.
#[cfg_attr(not(any(feature = "highs", feature = "coin_cbc")), allow(dead_code))]
#[derive(Debug, Clone, Default)]
pub(crate) struct BasisTracker {
    revision: Option<u64>,
}

#[cfg_attr(not(any(feature = "highs", feature = "coin_cbc")), allow(dead_code))]
impl BasisTracker {
    pub fn check(&self, model: &NativeModel) -> Result<(), SolveFault> {
        if self.revision == Some(model.revision()) {
            Ok(())
        } else {
            Err(SolveFault::InvalidBasis)
        }
    }

    pub fn rebuild(&mut self, model: &NativeModel) {
        self.revision = Some(model.revision());
    }

    pub fn clear(&mut self) {
        self.revision = None;
    }
}
