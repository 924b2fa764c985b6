pub mod error;

use calc_error::Error;
use crate::{
    builtin,
    ctxt::Ctxt,
    parser::ast::{Binary, BinOpKind, Call, Expr, Unary, UnaryOpKind},
    value::Value,
};
use error::{
    InvalidBinaryOperation,
    InvalidUnaryOperation,
    MissingArgument,
    NotCallable,
    TooManyArguments,
    TypeMismatch,
    UndefinedFunction,
    UndefinedVariable,
};

/// Any type that can be evaluated to produce a [`Value`].
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error>;
}

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        match self {
            Self::Literal(lit) => Ok(Value::Number(lit.value)),
            Self::Symbol(sym) => {
                if let Some(value) = ctxt.get_var(&sym.name) {
                    Ok(Value::Number(value))
                } else if let Some(func) = ctxt.get_func(&sym.name) {
                    Ok(Value::Function(func.name))
                } else {
                    Err(Error::new(vec![sym.span.clone()], UndefinedVariable {
                        name: sym.name.clone(),
                    }))
                }
            },
            Self::Call(call) => call.eval(ctxt),
            Self::Paren(paren) => paren.expr.eval(ctxt),
            Self::Unary(unary) => unary.eval(ctxt),
            Self::Binary(binary) => binary.eval(ctxt),
        }
    }
}

impl Eval for Unary {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let operand = self.operand.eval(ctxt)?;
        let Value::Number(n) = operand else {
            return Err(Error::new(
                vec![self.op.span.clone(), self.operand.span()],
                InvalidUnaryOperation { op: self.op.kind, expr_type: operand.typename() },
            ));
        };

        Ok(Value::Number(match self.op.kind {
            UnaryOpKind::Neg => -n,
            UnaryOpKind::Pos => n,
            UnaryOpKind::Factorial => builtin::factorial(n),
        }))
    }
}

impl Eval for Binary {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let lhs = self.lhs.eval(ctxt)?;
        let rhs = self.rhs.eval(ctxt)?;

        match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(match self.op.kind {
                BinOpKind::Exp => Value::Number(a.powf(b)),
                BinOpKind::Mul => Value::Number(a * b),
                BinOpKind::Div => Value::Number(a / b),
                BinOpKind::Mod => Value::Number(builtin::modulo(a, b)),
                BinOpKind::Add => Value::Number(a + b),
                BinOpKind::Sub => Value::Number(a - b),
                BinOpKind::Greater => Value::Boolean(a > b),
                BinOpKind::GreaterEq => Value::Boolean(a >= b),
                BinOpKind::Less => Value::Boolean(a < b),
                BinOpKind::LessEq => Value::Boolean(a <= b),
                BinOpKind::Eq => Value::Boolean(a == b),
                BinOpKind::NotEq => Value::Boolean(a != b),
            }),
            (Value::Boolean(a), Value::Boolean(b)) if self.op.kind == BinOpKind::Eq => {
                Ok(Value::Boolean(a == b))
            },
            (Value::Boolean(a), Value::Boolean(b)) if self.op.kind == BinOpKind::NotEq => {
                Ok(Value::Boolean(a != b))
            },
            (lhs, rhs) => Err(Error::new(
                vec![self.lhs.span(), self.op.span.clone(), self.rhs.span()],
                InvalidBinaryOperation {
                    op: self.op.kind,
                    implicit: self.op.implicit,
                    left: lhs.typename(),
                    right: rhs.typename(),
                },
            )),
        }
    }
}

impl Eval for Call {
    fn eval(&self, ctxt: &Ctxt) -> Result<Value, Error> {
        let name = self.name.name.as_str();
        let Some(func) = ctxt.get_func(name) else {
            if ctxt.get_var(name).is_some() {
                return Err(Error::new(vec![self.name.span.clone()], NotCallable {
                    name: name.to_string(),
                }));
            }
            return Err(Error::new(vec![self.name.span.clone()], UndefinedFunction {
                name: name.to_string(),
                suggestions: ctxt.get_similar_funcs(name),
            }));
        };

        let given = self.args.len();
        if given < func.arity.min {
            return Err(Error::new(vec![self.span.clone()], MissingArgument {
                name: name.to_string(),
                expected: func.arity.min,
                given,
            }));
        }
        if let Some(max) = func.arity.max.filter(|max| given > *max) {
            return Err(Error::new(vec![self.span.clone()], TooManyArguments {
                name: name.to_string(),
                expected: max,
                given,
            }));
        }

        let args = self.args
            .iter()
            .enumerate()
            .map(|(index, arg)| match arg.eval(ctxt)? {
                Value::Number(n) => Ok(n),
                other => Err(Error::new(vec![arg.span()], TypeMismatch {
                    name: name.to_string(),
                    index,
                    given: other.typename(),
                })),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Value::Number(func.call(&args)))
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
    use crate::parser::Parser;
    use super::*;

    fn eval(source: &str) -> Result<Value, Error> {
        let ctxt = Ctxt::default();
        Parser::new(source).try_parse_full().unwrap().eval(&ctxt)
    }

    fn number(source: &str) -> f64 {
        eval(source).unwrap().as_number().unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(number("1 + 2 * 3"), 7.0);
        assert_eq!(number("(1 + 2) * 3"), 9.0);
        assert_eq!(number("2^3^2"), 512.0);
        assert_eq!(number("-2^2"), -4.0);
        assert_eq!(number("2^-1"), 0.5);
        assert_eq!(number("7 % 3"), 1.0);
        assert_eq!(number("3!"), 6.0);
        assert_eq!(number("2(3 + 1)"), 8.0);
        assert_eq!(number("3 --2"), 5.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_float_absolute_eq!(number("sin(pi / 2)"), 1.0);
        assert_float_absolute_eq!(number("log(e)"), 1.0);
        assert_float_absolute_eq!(number("2pi"), std::f64::consts::TAU);
        assert_float_absolute_eq!(number("sqrt(16) + 1"), 5.0);
        assert_float_absolute_eq!(number("max(1, 5, 3)"), 5.0);
    }

    #[test]
    fn ieee_semantics() {
        assert!(number("1/0").is_infinite());
        assert!(number("sqrt(-1)").is_nan());
    }

    #[test]
    fn non_numeric_values() {
        assert_eq!(eval("sin").unwrap(), Value::Function("sin"));
        assert_eq!(eval("1 < 2").unwrap(), Value::Boolean(true));
        assert_eq!(eval("(1 < 2) == (3 < 4)").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn errors() {
        let message = |source: &str| eval(source).unwrap_err().to_string();

        assert_eq!(message("q + 1"), "`q` is not defined");
        assert_eq!(message("sqr(4)"), "the `sqr` function does not exist");
        assert_eq!(message("atan2(1)"), "missing argument #2 for the `atan2` function");
        assert_eq!(message("sqrt(1, 2)"), "too many arguments were given to the `sqrt` function");
        assert_eq!(message("pi(2)"), "`pi` is not a function");
        assert_eq!(message("sqrt(sin)"), "incorrect type for argument #1 for the `sqrt` function");
        assert_eq!(message("sin + 1"), "cannot apply the `+` operator to these operands");
        assert_eq!(message("-(1 < 2)"), "cannot apply the `Neg` operator to this operand");
    }
}
