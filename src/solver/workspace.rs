// Model-building operations shared by the simplex-style backends and the SCIP
// process backend. Every index and feature check runs before the native model
// is touched.

use super::lp_format::write_lp_file;
use super::native::{column_name, BoundKind, ColumnKind, Direction, NativeModel};
use crate::domain::{EqualityType, Equation, Result, SolverBackend, SolverError, Variable};
use std::path::Path;
use tracing::{debug, trace};

pub struct LpWorkspace {
    backend: SolverBackend,
    model: Option<NativeModel>,
}

impl LpWorkspace {
    pub fn new(backend: SolverBackend) -> Self {
        Self {
            backend,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&NativeModel> {
        self.model.as_ref()
    }

    pub fn require_model(&self, operation: &'static str) -> Result<&NativeModel> {
        self.model.as_ref().ok_or(SolverError::NoActiveModel {
            backend: self.backend,
            operation,
        })
    }

    fn require_model_mut(&mut self, operation: &'static str) -> Result<&mut NativeModel> {
        let backend = self.backend;
        self.model
            .as_mut()
            .ok_or(SolverError::NoActiveModel { backend, operation })
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.model.as_ref().map(|m| (m.num_cols(), m.num_rows()))
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.model.is_some() {
            self.clear()?;
        }
        self.model = Some(NativeModel::new());
        debug!(
            component = "workspace",
            operation = "initialize",
            backend = %self.backend,
            "Allocated native model"
        );
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.model.take().is_some() {
            debug!(
                component = "workspace",
                operation = "clear",
                backend = %self.backend,
                "Dropped native model"
            );
        }
        Ok(())
    }

    pub fn load_variable(
        &mut self,
        variable: &Variable,
        relax_integer: bool,
        use_tight_bounds: bool,
    ) -> Result<()> {
        let model = self.require_model_mut("add variable")?;
        let columns = model.num_cols();
        if variable.index > columns {
            return Err(SolverError::IndexGap {
                index: variable.index,
                len: columns,
            });
        }

        let j = variable.index + 1;
        if variable.index == columns {
            model.add_cols(1);
        }
        model.set_col_name(j, column_name(variable));

        let (lower, upper) = variable.bounds(use_tight_bounds);
        model.set_col_bnds(j, BoundKind::for_pair(lower, upper), lower, upper);

        let kind = if variable.binary && !relax_integer {
            ColumnKind::Integer
        } else {
            ColumnKind::Continuous
        };
        model.set_col_kind(j, kind);

        trace!(
            component = "workspace",
            operation = "load_variable",
            column = j,
            lower,
            upper,
            integer = kind == ColumnKind::Integer,
            "Loaded column"
        );
        Ok(())
    }

    pub fn load_objective(&mut self, objective: &Equation, maximize: bool) -> Result<()> {
        if objective.is_quadratic() {
            return Err(SolverError::QuadraticUnsupported {
                backend: self.backend,
                context: "objective",
            });
        }
        let model = self.require_model_mut("add objective")?;
        check_terms(objective, model.num_cols(), "objective")?;

        model.set_obj_dir(if maximize {
            Direction::Maximize
        } else {
            Direction::Minimize
        });
        for j in 1..=model.num_cols() {
            model.set_obj_coef(j, 0.0);
        }
        for &(index, coefficient) in &objective.terms {
            model.set_obj_coef(index + 1, coefficient);
        }
        Ok(())
    }

    pub fn add_constraint(&mut self, constraint: &Equation) -> Result<()> {
        if constraint.is_quadratic() {
            return Err(SolverError::QuadraticUnsupported {
                backend: self.backend,
                context: "constraint",
            });
        }
        let model = self.require_model_mut("add constraint")?;
        check_terms(constraint, model.num_cols(), "constraint")?;
        let rows = model.num_rows();
        if constraint.index > rows {
            return Err(SolverError::IndexGap {
                index: constraint.index,
                len: rows,
            });
        }

        let i = constraint.index + 1;
        if constraint.index == rows {
            model.add_rows(1);
        }

        let rhs = constraint.right_hand_side;
        match constraint.equality_type {
            EqualityType::Equal => model.set_row_bnds(i, BoundKind::Fixed, rhs, rhs),
            EqualityType::Greater => model.set_row_bnds(i, BoundKind::Lower, rhs, f64::INFINITY),
            EqualityType::Less => model.set_row_bnds(i, BoundKind::Upper, f64::NEG_INFINITY, rhs),
        }

        let entries: Vec<(usize, f64)> = constraint
            .terms
            .iter()
            .map(|&(index, coefficient)| (index + 1, coefficient))
            .collect();
        model.set_mat_row(i, &entries);
        Ok(())
    }

    /// Write `<dir>/<filename>` and `<dir>/<filename><sequence>`
    pub fn write_dump(&self, dir: &Path, filename: &str, sequence: u32) -> Result<()> {
        let model = self.require_model("print problem")?;
        std::fs::create_dir_all(dir).map_err(|e| SolverError::io(dir, e))?;

        let canonical = dir.join(filename);
        write_lp_file(model, &canonical).map_err(|e| SolverError::io(&canonical, e))?;

        let snapshot = dir.join(format!("{filename}{sequence}"));
        write_lp_file(model, &snapshot).map_err(|e| SolverError::io(&snapshot, e))?;

        debug!(
            component = "workspace",
            operation = "print_model",
            path = %canonical.display(),
            sequence,
            "Wrote problem dump"
        );
        Ok(())
    }
}

fn check_terms(equation: &Equation, columns: usize, context: &'static str) -> Result<()> {
    match equation.terms.iter().find(|&&(index, _)| index >= columns) {
        Some(&(index, _)) => Err(SolverError::UnknownVariable {
            index,
            columns,
            context,
        }),
        None => Ok(()),
    }
}
