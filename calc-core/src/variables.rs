use std::collections::BTreeMap;

/// Returns true if `name` can be used as a variable name: a single lowercase ASCII letter other
/// than `x` and `y`, which are reserved for graphing.
pub fn is_valid_name(name: char) -> bool {
    name.is_ascii_lowercase() && name != 'x' && name != 'y'
}

/// The user-defined variables, kept sorted by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variables {
    values: BTreeMap<char, f64>,
}

impl Variables {
    /// Creates an empty set of variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, replacing any previous value. Returns false, without storing anything,
    /// if the name is not a valid variable name or the value is not finite.
    pub fn set(&mut self, name: char, value: f64) -> bool {
        if !is_valid_name(name) || !value.is_finite() {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    /// Returns the value of a variable.
    pub fn get(&self, name: char) -> Option<f64> {
        self.values.get(&name).copied()
    }

    /// Removes every variable.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns an iterator over the variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
