// Entity registry: canonical, backend-independent index space of variables

use super::models::Variable;
use super::solver_service::{Result, SolverError};

/// Dense, 0-based store of registered variables
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    variables: Vec<Variable>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Overwrite the entry at `variable.index`, or append when the index equals
    /// the current size. Larger indices would leave a gap and are rejected.
    pub fn register(&mut self, variable: Variable) -> Result<()> {
        let len = self.variables.len();
        match variable.index {
            i if i < len => self.variables[i] = variable,
            i if i == len => self.variables.push(variable),
            index => return Err(SolverError::IndexGap { index, len }),
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&Variable> {
        self.variables
            .get(index)
            .ok_or(SolverError::IndexOutOfRange {
                index,
                len: self.variables.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_registration() {
        let mut registry = EntityRegistry::new();
        for i in 0..5 {
            registry
                .register(Variable::continuous(i, format!("v{i}")))
                .unwrap();
        }
        assert_eq!(registry.size(), 5);
        for i in 0..5 {
            assert_eq!(registry.get(i).unwrap().name, format!("v{i}"));
        }
    }

    #[test]
    fn re_registration_overwrites_in_place() {
        let mut registry = EntityRegistry::new();
        registry.register(Variable::continuous(0, "a")).unwrap();
        registry.register(Variable::continuous(1, "b")).unwrap();
        registry
            .register(Variable::continuous(0, "a2").with_bounds(1.0, 2.0))
            .unwrap();

        assert_eq!(registry.size(), 2);
        assert_eq!(registry.get(0).unwrap().name, "a2");
        assert_eq!(registry.get(0).unwrap().upper_bound, 2.0);
    }

    #[test]
    fn gaps_and_out_of_range_are_reported() {
        let mut registry = EntityRegistry::new();
        let err = registry.register(Variable::continuous(2, "c")).unwrap_err();
        assert!(matches!(err, SolverError::IndexGap { index: 2, len: 0 }));
        assert!(registry.is_empty());

        let err = registry.get(0).unwrap_err();
        assert!(matches!(err, SolverError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn clear_empties() {
        let mut registry = EntityRegistry::new();
        registry.register(Variable::continuous(0, "a")).unwrap();
        registry.clear();
        assert_eq!(registry.size(), 0);
    }
}
