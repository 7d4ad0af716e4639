// Parser for the console output of `scip -f <problem>`

use super::native::NativeModel;
use crate::domain::{
    EntityRegistry, Result, Solution, SolutionStatus, SolverBackend, SolverError,
};
use std::collections::HashMap;
use std::path::Path;

/// Turns a finished external solve into a `Solution`
///
/// Listed names are matched against the columns of `model`; the solution has
/// one value per entry of `registry`.
pub trait ResultParser {
    fn parse(&self, output: &Path, model: &NativeModel, registry: &EntityRegistry)
        -> Result<Solution>;
}

/// Reads the `SCIP Status` line, the objective value and the solution listing.
/// Variables missing from the listing are zero.
pub struct ScipOutputParser {
    /// Status for a solution found before a limit stopped the search
    pub suboptimal_status: SolutionStatus,
}

impl ScipOutputParser {
    pub fn new(suboptimal_status: SolutionStatus) -> Self {
        Self { suboptimal_status }
    }

    pub fn parse_str(
        &self,
        text: &str,
        model: &NativeModel,
        registry: &EntityRegistry,
    ) -> Result<Solution> {
        let status_line = text
            .lines()
            .find_map(|line| line.trim().strip_prefix("SCIP Status"))
            .ok_or_else(|| SolverError::ExecutionFailed("SCIP output has no status line".into()))?;
        let detail = status_line
            .split_once('[')
            .and_then(|(_, rest)| rest.split_once(']'))
            .map(|(inner, _)| inner.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let has_solution = text.contains("objective value:");
        match detail.as_str() {
            "optimal solution found" => {}
            "infeasible" | "infeasible or unbounded" => {
                return Ok(Solution::new(SolutionStatus::Infeasible))
            }
            "unbounded" => return Ok(Solution::new(SolutionStatus::Unbounded)),
            d if d.contains("limit") || d == "user interrupt" => {
                if has_solution {
                    return Ok(Solution::new(self.suboptimal_status));
                }
                return Ok(Solution::new(SolutionStatus::Infeasible));
            }
            _ => {
                return Err(SolverError::UnrecognizedStatus {
                    backend: SolverBackend::Scip,
                    status: detail,
                })
            }
        }

        let columns: HashMap<&str, usize> = model
            .columns()
            .iter()
            .enumerate()
            .map(|(k, column)| (column.name.as_str(), k))
            .collect();
        let mut values = vec![0.0; registry.size()];
        let mut objective = None;
        let mut in_listing = false;

        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("objective value:") {
                objective = Some(parse_number(rest.trim())?);
                in_listing = true;
                continue;
            }
            if !in_listing {
                continue;
            }
            if line.is_empty() {
                break;
            }
            let mut fields = line.split_whitespace();
            let (Some(name), Some(value)) = (fields.next(), fields.next()) else {
                continue;
            };
            if let Some(slot) = columns.get(name).and_then(|&k| values.get_mut(k)) {
                *slot = parse_number(value)?;
            }
        }

        let objective = objective.ok_or_else(|| {
            SolverError::ExecutionFailed("SCIP reported optimal but printed no solution".into())
        })?;
        Ok(Solution::success(objective, values))
    }
}

impl ResultParser for ScipOutputParser {
    fn parse(
        &self,
        output: &Path,
        model: &NativeModel,
        registry: &EntityRegistry,
    ) -> Result<Solution> {
        let text = std::fs::read_to_string(output).map_err(|e| SolverError::io(output, e))?;
        self.parse_str(&text, model, registry)
    }
}

fn parse_number(text: &str) -> Result<f64> {
    match text {
        "+infinity" | "infinity" => Ok(f64::INFINITY),
        "-infinity" => Ok(f64::NEG_INFINITY),
        _ => text
            .parse()
            .map_err(|_| SolverError::ExecutionFailed(format!("bad number in SCIP output: {text}"))),
    }
}
