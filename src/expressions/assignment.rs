//! An assignment of real values to symbolic variables, consumed by the
//! evaluator. The assignment is the only mutable piece of the model: it is
//! created by the caller, may be mutated between evaluation passes and is
//! not part of the immutable expression graph. It carries no internal
//! synchronization; treat each instance as owned by a single evaluation.

use std::collections::HashMap;

use crate::expressions::expr_tree::Variable;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    bindings: HashMap<Variable, f64>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment::default()
    }

    /// Bound value for `var`, or `None` if the variable has no binding.
    pub fn get(&self, var: &Variable) -> Option<f64> {
        self.bindings.get(var).copied()
    }

    /// Binds `var` to `value`, returning the previous binding if any.
    /// Keys are unique: rebinding replaces.
    pub fn insert(&mut self, var: Variable, value: f64) -> Option<f64> {
        self.bindings.insert(var, value)
    }

    pub fn remove(&mut self, var: &Variable) -> Option<f64> {
        self.bindings.remove(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.bindings.contains_key(var)
    }

    /// Whether every variable in `vars` has a binding. An expression whose
    /// `variables()` all pass this check evaluates without an
    /// unbound-variable error.
    pub fn contains_all<'a>(&self, vars: impl IntoIterator<Item = &'a Variable>) -> bool {
        vars.into_iter().all(|v| self.contains(v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.bindings.keys()
    }
}

impl From<HashMap<Variable, f64>> for Assignment {
    fn from(bindings: HashMap<Variable, f64>) -> Self {
        Assignment { bindings }
    }
}

impl FromIterator<(Variable, f64)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        Assignment {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Variable, f64)> for Assignment {
    fn extend<I: IntoIterator<Item = (Variable, f64)>>(&mut self, iter: I) {
        self.bindings.extend(iter);
    }
}

//___________________________________TESTS____________________________________
