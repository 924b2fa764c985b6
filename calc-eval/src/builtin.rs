//! The builtin functions available to every expression.
//!
//! Trigonometric functions take and return radians.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The number of arguments a builtin function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// The minimum number of arguments.
    pub min: usize,

    /// The maximum number of arguments, or [`None`] if the function is variadic.
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// Between `min` and `max` arguments, inclusive.
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// At least `min` arguments.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }
}

/// A builtin function.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The name of the function.
    pub name: &'static str,

    /// The number of arguments the function accepts.
    pub arity: Arity,

    func: fn(&[f64]) -> f64,
}

impl Builtin {
    /// Calls the function. The number of arguments must already satisfy [`Builtin::arity`].
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.func)(args)
    }
}

/// Build builtins that take a single argument.
macro_rules! build_unary {
    ($($name:literal => $func:expr),* $(,)?) => {
        [$(
            Builtin {
                name: $name,
                arity: Arity::exact(1),
                func: |args| ($func)(args[0]),
            }
        ),*]
    };
}

/// The factorial of `n`. Only defined for non-negative integers; anything else is NaN, and
/// results too large for an `f64` are infinite.
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }

    (1..=n as u32).fold(1.0, |acc, k| acc * k as f64)
}

/// Rounds `n` to `digits` decimal places.
fn round_to_digits(n: f64, digits: f64) -> f64 {
    if digits.fract() != 0.0 || !(0.0..=15.0).contains(&digits) {
        return f64::NAN;
    }
    let factor = 10f64.powi(digits as i32);
    (n * factor).round() / factor
}

/// Modulo with the sign of the divisor, where anything modulo zero is itself.
pub fn modulo(n: f64, m: f64) -> f64 {
    if m == 0.0 {
        n
    } else {
        n - m * (n / m).floor()
    }
}

/// Sign of a number, with the sign of zero being zero.
fn sign(n: f64) -> f64 {
    if n == 0.0 || n.is_nan() {
        n
    } else {
        n.signum()
    }
}

fn all() -> Vec<Builtin> {
    let unary = build_unary! {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "csc" => |n: f64| n.sin().recip(),
        "sec" => |n: f64| n.cos().recip(),
        "cot" => |n: f64| n.tan().recip(),
        "asin" => f64::asin,
        "acos" => f64::acos,
        "atan" => f64::atan,
        "sinh" => f64::sinh,
        "cosh" => f64::cosh,
        "tanh" => f64::tanh,
        "asinh" => f64::asinh,
        "acosh" => f64::acosh,
        "atanh" => f64::atanh,
        "sqrt" => f64::sqrt,
        "cbrt" => f64::cbrt,
        "abs" => f64::abs,
        "exp" => f64::exp,
        "log10" => f64::log10,
        "log2" => f64::log2,
        "floor" => f64::floor,
        "ceil" => f64::ceil,
        "sign" => sign,
        "factorial" => factorial,
    };

    let mut builtins = Vec::from(unary);
    builtins.extend([
        Builtin {
            name: "log",
            arity: Arity::range(1, 2),
            func: |args| match args {
                [n, base] => n.ln() / base.ln(),
                _ => args[0].ln(),
            },
        },
        Builtin {
            name: "round",
            arity: Arity::range(1, 2),
            func: |args| match args {
                [n, digits] => round_to_digits(*n, *digits),
                _ => args[0].round(),
            },
        },
        Builtin {
            name: "atan2",
            arity: Arity::exact(2),
            func: |args| args[0].atan2(args[1]),
        },
        Builtin {
            name: "pow",
            arity: Arity::exact(2),
            func: |args| args[0].powf(args[1]),
        },
        Builtin {
            name: "mod",
            arity: Arity::exact(2),
            func: |args| modulo(args[0], args[1]),
        },
        Builtin {
            name: "min",
            arity: Arity::at_least(1),
            func: |args| args.iter().copied().fold(f64::INFINITY, f64::min),
        },
        Builtin {
            name: "max",
            arity: Arity::at_least(1),
            func: |args| args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        },
        Builtin {
            name: "hypot",
            arity: Arity::at_least(1),
            func: |args| args.iter().map(|n| n * n).sum::<f64>().sqrt(),
        },
    ]);
    builtins
}

/// Every builtin function, keyed by name.
pub static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    all()
        .into_iter()
        .map(|builtin| (builtin.name, builtin))
        .collect()
});

/// Returns the builtin function with the given name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}
