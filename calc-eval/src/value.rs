use std::fmt::{self, Display, Formatter};

/// Represents any value an expression can evaluate to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A floating-point number. This includes infinities and NaN, which the caller decides how to
    /// treat.
    Number(f64),

    /// The result of a comparison.
    Boolean(bool),

    /// A reference to a builtin function, produced by naming a function without calling it.
    Function(&'static str),
}

impl Value {
    /// Returns the typename of this value.
    pub fn typename(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Function(_) => "function",
        }
    }

    /// Returns the number this value holds, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Function(name) => write!(f, "{}(...)", name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}
