// Native model store
// Column/row layout the simplex-style backends build incrementally. Indices
// are 1-based, as in the native solver libraries. Mutation is crate-private;
// the workspace validates every index before it calls in.

use crate::domain::Variable;

/// Bound type of a column or row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Free,
    Lower,
    Upper,
    Double,
    Fixed,
}

impl BoundKind {
    /// Bound type for a pair: equal values fix it, infinite sides stay open
    pub fn for_pair(lower: f64, upper: f64) -> Self {
        if lower == upper {
            return BoundKind::Fixed;
        }
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) => BoundKind::Double,
            (true, false) => BoundKind::Lower,
            (false, true) => BoundKind::Upper,
            (false, false) => BoundKind::Free,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Continuous,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NativeColumn {
    pub name: String,
    pub kind: ColumnKind,
    pub bound_kind: BoundKind,
    pub lower: f64,
    pub upper: f64,
    pub objective: f64,
}

impl NativeColumn {
    /// Effective (lower, upper), with infinities on open sides
    pub fn bounds(&self) -> (f64, f64) {
        effective_bounds(self.bound_kind, self.lower, self.upper)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NativeRow {
    pub name: String,
    pub bound_kind: BoundKind,
    pub lower: f64,
    pub upper: f64,
    /// (1-based column, coefficient)
    pub coefficients: Vec<(usize, f64)>,
}

impl NativeRow {
    /// Effective (lower, upper), with infinities on open sides
    pub fn bounds(&self) -> (f64, f64) {
        effective_bounds(self.bound_kind, self.lower, self.upper)
    }
}

/// Effective (lower, upper) of a bound, with infinities on open sides
fn effective_bounds(kind: BoundKind, lower: f64, upper: f64) -> (f64, f64) {
    match kind {
        BoundKind::Free => (f64::NEG_INFINITY, f64::INFINITY),
        BoundKind::Lower => (lower, f64::INFINITY),
        BoundKind::Upper => (f64::NEG_INFINITY, upper),
        BoundKind::Double => (lower, upper),
        BoundKind::Fixed => (lower, lower),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeModel {
    direction: Direction,
    columns: Vec<NativeColumn>,
    rows: Vec<NativeRow>,
    revision: u64,
}

impl NativeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Bumped by every mutation; engines use it to tell whether a basis
    /// still belongs to this model.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn columns(&self) -> &[NativeColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[NativeRow] {
        &self.rows
    }

    /// Column `j` (1-based)
    pub fn column(&self, j: usize) -> Option<&NativeColumn> {
        self.columns.get(j.checked_sub(1)?)
    }

    /// Row `i` (1-based)
    pub fn row(&self, i: usize) -> Option<&NativeRow> {
        self.rows.get(i.checked_sub(1)?)
    }

    /// Append `count` continuous columns fixed at zero; returns the first new index
    pub(crate) fn add_cols(&mut self, count: usize) -> usize {
        let first = self.columns.len() + 1;
        for j in first..first + count {
            self.columns.push(NativeColumn {
                name: format!("x{j}"),
                kind: ColumnKind::Continuous,
                bound_kind: BoundKind::Fixed,
                lower: 0.0,
                upper: 0.0,
                objective: 0.0,
            });
        }
        self.touch();
        first
    }

    pub(crate) fn set_col_name(&mut self, j: usize, name: impl Into<String>) {
        self.columns[j - 1].name = name.into();
        self.touch();
    }

    pub(crate) fn set_col_bnds(&mut self, j: usize, kind: BoundKind, lower: f64, upper: f64) {
        let col = &mut self.columns[j - 1];
        col.bound_kind = kind;
        col.lower = lower;
        col.upper = upper;
        self.touch();
    }

    pub(crate) fn set_col_kind(&mut self, j: usize, kind: ColumnKind) {
        self.columns[j - 1].kind = kind;
        self.touch();
    }

    pub(crate) fn set_obj_dir(&mut self, direction: Direction) {
        self.direction = direction;
        self.touch();
    }

    pub(crate) fn set_obj_coef(&mut self, j: usize, coefficient: f64) {
        self.columns[j - 1].objective = coefficient;
        self.touch();
    }

    /// Append `count` free, empty rows; returns the first new index
    pub(crate) fn add_rows(&mut self, count: usize) -> usize {
        let first = self.rows.len() + 1;
        for i in first..first + count {
            self.rows.push(NativeRow {
                name: format!("r_{i}"),
                bound_kind: BoundKind::Free,
                lower: 0.0,
                upper: 0.0,
                coefficients: Vec::new(),
            });
        }
        self.touch();
        first
    }

    pub(crate) fn set_row_bnds(&mut self, i: usize, kind: BoundKind, lower: f64, upper: f64) {
        let row = &mut self.rows[i - 1];
        row.bound_kind = kind;
        row.lower = lower;
        row.upper = upper;
        self.touch();
    }

    /// Replace row `i`; repeated columns are merged by summing
    pub(crate) fn set_mat_row(&mut self, i: usize, entries: &[(usize, f64)]) {
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for &(j, value) in entries {
            match merged.iter_mut().find(|(col, _)| *col == j) {
                Some(entry) => entry.1 += value,
                None => merged.push((j, value)),
            }
        }
        self.rows[i - 1].coefficients = merged;
        self.touch();
    }

    /// Objective at `values` (0-based column values)
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.columns
            .iter()
            .zip(values)
            .map(|(col, x)| col.objective * x)
            .sum()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// LP-safe column name for a variable
///
/// The index prefix keeps names unique per column whatever the display names
/// are; the sanitized display name is appended for readability.
pub fn column_name(variable: &Variable) -> String {
    let cleaned: String = variable
        .name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "_.!\"#$%&()/,;?@'{}|~".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        format!("x{}", variable.index)
    } else {
        format!("x{}_{cleaned}", variable.index)
    }
}
