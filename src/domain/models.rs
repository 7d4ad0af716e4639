use super::value_objects::{EqualityType, SolutionStatus};

/// Decision variable
///
/// `index` is assigned by the caller and fixes the column position of the
/// variable in every backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Tighter bound pair, used when a load requests tight bounds
    pub min: f64,
    pub max: f64,
    /// Requests integer treatment unless the load relaxes integrality
    pub binary: bool,
    pub name: String,
}

impl Variable {
    pub fn continuous(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            lower_bound: 0.0,
            upper_bound: f64::INFINITY,
            min: 0.0,
            max: f64::INFINITY,
            binary: false,
            name: name.into(),
        }
    }

    pub fn binary(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            lower_bound: 0.0,
            upper_bound: 1.0,
            min: 0.0,
            max: 1.0,
            binary: true,
            name: name.into(),
        }
    }

    /// Set the solve bounds. The tight pair follows unless set afterwards.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self.min = lower;
        self.max = upper;
        self
    }

    pub fn with_tight_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn integer(mut self) -> Self {
        self.binary = true;
        self
    }

    /// Bound pair used for a load
    pub fn bounds(&self, use_tight_bounds: bool) -> (f64, f64) {
        if use_tight_bounds {
            (self.min, self.max)
        } else {
            (self.lower_bound, self.upper_bound)
        }
    }
}

/// Linear equation, used both as constraint and as objective
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// Row position when used as a constraint; ignored for objectives
    pub index: usize,
    pub equality_type: EqualityType,
    pub right_hand_side: f64,
    /// (variable index, coefficient) pairs
    pub terms: Vec<(usize, f64)>,
    /// (variable index, variable index, coefficient) triples
    pub quadratic_terms: Vec<(usize, usize, f64)>,
}

impl Equation {
    pub fn new(index: usize, equality_type: EqualityType, right_hand_side: f64) -> Self {
        Self {
            index,
            equality_type,
            right_hand_side,
            terms: Vec::new(),
            quadratic_terms: Vec::new(),
        }
    }

    /// Objective skeleton; row index and relation are unused
    pub fn objective() -> Self {
        Self::new(0, EqualityType::Equal, 0.0)
    }

    pub fn with_term(mut self, variable: usize, coefficient: f64) -> Self {
        self.terms.push((variable, coefficient));
        self
    }

    pub fn with_terms(mut self, terms: impl IntoIterator<Item = (usize, f64)>) -> Self {
        self.terms.extend(terms);
        self
    }

    pub fn with_quadratic_term(mut self, first: usize, second: usize, coefficient: f64) -> Self {
        self.quadratic_terms.push((first, second, coefficient));
        self
    }

    pub fn is_quadratic(&self) -> bool {
        !self.quadratic_terms.is_empty()
    }
}

/// Result of a solve that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective: f64,
    /// One value per registered variable, indexed like the entity registry
    pub values: Vec<f64>,
}

impl Solution {
    pub fn new(status: SolutionStatus) -> Self {
        Self {
            status,
            objective: 0.0,
            values: Vec::new(),
        }
    }

    pub fn success(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Success,
            objective,
            values,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SolutionStatus::Success
    }
}
