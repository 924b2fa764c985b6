use crate::builtin::{self, Builtin, BUILTINS};
use levenshtein::levenshtein;
use std::collections::HashMap;

/// The mathematical constants every default context starts with.
pub const CONSTANTS: [(&str, f64); 6] = [
    ("pi", std::f64::consts::PI),
    ("PI", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("E", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
    ("phi", 1.618_033_988_749_895),
];

/// A context to use when evaluating an expression, containing the variables that can be used
/// within the expression.
///
/// Functions are always the [builtins](crate::builtin).
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: CONSTANTS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

impl Ctxt {
    /// Creates a new context without any variables, not even the constants.
    ///
    /// Consider using the [`Default`] implementation instead.
    pub fn new() -> Ctxt {
        Ctxt { vars: HashMap::new() }
    }

    /// Add a variable to the context, replacing any previous value.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Get a function by name.
    pub fn get_func(&self, name: &str) -> Option<&'static Builtin> {
        builtin::lookup(name)
    }

    /// Returns all functions with a name similar to the given name, sorted by name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<&'static str> {
        let mut similar = BUILTINS
            .keys()
            .copied()
            .filter(|n| levenshtein(n, name) < 2)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}
