// Scripted [`LpEngine`] for exercising the adapters without a solver library.

use super::engine::{LpEngine, NativeStatus, SolveFault};
use super::native::NativeModel;
use std::collections::VecDeque;

pub(crate) struct ScriptedEngine {
    pub warm_up_ok: bool,
    /// Popped per `simplex` call; `Ok(())` once exhausted
    pub simplex_results: VecDeque<Result<(), SolveFault>>,
    pub intopt_result: Result<(), SolveFault>,
    pub lp_status: NativeStatus,
    pub mip_status: NativeStatus,
    pub objective: f64,
    pub columns: Vec<f64>,
    pub calls: Vec<&'static str>,
}

impl ScriptedEngine {
    /// Engine whose LP and MIP solves both report `status`
    pub fn reporting(status: NativeStatus, objective: f64, columns: Vec<f64>) -> Self {
        Self {
            warm_up_ok: false,
            simplex_results: VecDeque::new(),
            intopt_result: Ok(()),
            lp_status: status.clone(),
            mip_status: status,
            objective,
            columns,
            calls: Vec::new(),
        }
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::reporting(NativeStatus::Undefined, 0.0, Vec::new())
    }
}

impl LpEngine for ScriptedEngine {
    fn warm_up(&mut self, _model: &NativeModel) -> Result<(), SolveFault> {
        self.calls.push("warm_up");
        if self.warm_up_ok {
            Ok(())
        } else {
            Err(SolveFault::InvalidBasis)
        }
    }

    fn advanced_basis(&mut self, _model: &NativeModel) {
        self.calls.push("advanced_basis");
    }

    fn simplex(&mut self, _model: &NativeModel) -> Result<(), SolveFault> {
        self.calls.push("simplex");
        self.simplex_results.pop_front().unwrap_or(Ok(()))
    }

    fn intopt(&mut self, _model: &NativeModel) -> Result<(), SolveFault> {
        self.calls.push("intopt");
        self.intopt_result.clone()
    }

    fn lp_status(&self) -> NativeStatus {
        self.lp_status.clone()
    }

    fn mip_status(&self) -> NativeStatus {
        self.mip_status.clone()
    }

    fn lp_objective(&self) -> f64 {
        self.objective
    }

    fn mip_objective(&self) -> f64 {
        self.objective
    }

    fn lp_column(&self, j: usize) -> f64 {
        self.columns[j - 1]
    }

    fn mip_column(&self, j: usize) -> f64 {
        self.columns[j - 1]
    }

    fn reset(&mut self) {
        self.calls.push("reset");
    }
}
