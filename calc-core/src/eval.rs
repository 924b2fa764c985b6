//! The tagged result of evaluating a resolved expression.

use calc_error::Error;
use calc_eval::{
    ctxt::Ctxt,
    eval::Eval,
    parser::ast::Expr,
    value::Value,
};
use std::fmt;

/// The name of the variable a graphed [`Function`] is evaluated over.
pub const INDEPENDENT: &str = "x";

/// Describes an expression that could not be parsed or evaluated.
#[derive(Debug)]
pub struct Failure {
    /// The resolved source that was handed to the evaluator. Error spans point into this string.
    pub source: String,

    /// The errors reported by the evaluator.
    pub errors: Vec<Error>,
}

impl Failure {
    /// Report the errors of this failure to stderr.
    pub fn report_to_stderr(&self) {
        for err in &self.errors {
            err.report_to_stderr("input", &self.source);
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

/// The outcome of evaluating an expression.
#[derive(Debug)]
pub enum Evaluation {
    /// The expression evaluated to a number. The number may be infinite or NaN.
    Number(f64),

    /// The expression evaluated to something other than a number, such as a comparison or a bare
    /// function name.
    NonNumeric(Value),

    /// The expression could not be parsed or evaluated.
    Failed(Failure),
}

impl Evaluation {
    /// Parses and evaluates an already resolved expression in a default context.
    pub fn of(source: &str) -> Self {
        match calc_eval::evaluate(source, &Ctxt::default()) {
            Ok(Value::Number(n)) => Self::Number(n),
            Ok(value) => Self::NonNumeric(value),
            Err(errors) => Self::Failed(Failure { source: source.to_string(), errors }),
        }
    }

    /// Returns the result if it is a finite number.
    pub fn finite(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Returns the failure, if evaluation failed.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Consumes the evaluation, returning the failure, if evaluation failed.
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// A function of [`INDEPENDENT`], parsed once and evaluated at many points.
#[derive(Debug, Clone)]
pub struct Function {
    /// The resolved source of the function.
    pub source: String,
    expr: Expr,
}

impl Function {
    /// Parses a resolved function body.
    pub fn compile(source: &str) -> Result<Self, Failure> {
        calc_eval::parse(source)
            .map(|expr| Self { source: source.to_string(), expr })
            .map_err(|errors| Failure { source: source.to_string(), errors })
    }

    /// Evaluates the function at `x`, reusing the given context. Returns [`None`] if the result
    /// is not a finite number.
    pub fn eval_with(&self, ctxt: &mut Ctxt, x: f64) -> Option<f64> {
        ctxt.add_var(INDEPENDENT, x);
        match self.expr.eval(ctxt) {
            Ok(Value::Number(y)) if y.is_finite() => Some(y),
            _ => None,
        }
    }

    /// Evaluates the function at `x`. Returns [`None`] if the result is not a finite number.
    pub fn eval_at(&self, x: f64) -> Option<f64> {
        self.eval_with(&mut Ctxt::default(), x)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use super::*;

    #[test]
    fn tagged_results() {
        assert_eq!(Evaluation::of("2 + 3").finite(), Some(5.0));
        assert!(matches!(Evaluation::of("1/0"), Evaluation::Number(n) if n.is_infinite()));
        assert_eq!(Evaluation::of("1/0").finite(), None);
        assert!(matches!(Evaluation::of("1 < 2"), Evaluation::NonNumeric(Value::Boolean(true))));
        assert!(matches!(Evaluation::of("sin"), Evaluation::NonNumeric(_)));

        let failure = Evaluation::of("2 +").into_failure().unwrap();
        assert_eq!(failure.source, "2 +");
        assert_eq!(failure.to_string(), "unexpected end of expression");
    }

    #[test]
    fn function_of_x() {
        let f = Function::compile("x^2 - 1").unwrap();
        assert_float_absolute_eq!(f.eval_at(2.0).unwrap(), 3.0);
        assert_eq!(Function::compile("1/x").unwrap().eval_at(0.0), None);
        assert_eq!(Function::compile("sqrt(x)").unwrap().eval_at(-1.0), None);
        assert!(Function::compile("x +* 2").is_err());
    }
}
