//! Satisfying assignments returned by a solver

use std::collections::BTreeSet;

/// The set of variables a solver assigned true. Everything else is false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    true_vars: BTreeSet<i32>,
}

impl Model {
    /// Build from signed literals, keeping only the positive ones. A `0` terminator is ignored.
    pub fn from_literals<I: IntoIterator<Item = i32>>(literals: I) -> Self {
        Self {
            true_vars: literals.into_iter().filter(|&lit| lit > 0).collect(),
        }
    }

    /// Build from variables known to be true
    pub fn from_true_variables<I: IntoIterator<Item = i32>>(vars: I) -> Self {
        Self::from_literals(vars)
    }

    pub fn is_true(&self, var: i32) -> bool {
        self.true_vars.contains(&var)
    }

    /// True variables in ascending order
    pub fn true_variables(&self) -> impl Iterator<Item = i32> + '_ {
        self.true_vars.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.true_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.true_vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_literals_keeps_positive() {
        let model = Model::from_literals([1, -2, 3, -4, 0]);
        assert!(model.is_true(1));
        assert!(!model.is_true(2));
        assert!(model.is_true(3));
        assert!(!model.is_true(0));
        assert_eq!(model.true_variables().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(model.len(), 2);
    }
}
