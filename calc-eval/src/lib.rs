//! Parser and evaluator for the numeric expression language of the calculator.
//!
//! Expressions are parsed once into an [`Expr`](parser::ast::Expr) and can then be evaluated any
//! number of times against a [`Ctxt`], which is how graphs are sampled: the `x` variable is
//! rebound in the context for each sample.
//!
//! ```
//! use calc_eval::{ctxt::Ctxt, value::Value};
//!
//! let ctxt = Ctxt::default();
//! assert_eq!(calc_eval::evaluate("2 + 3 * 4", &ctxt).unwrap(), Value::Number(14.0));
//! ```

pub mod builtin;
pub mod ctxt;
pub mod eval;
pub mod parser;
pub mod tokenizer;
pub mod value;

use calc_error::Error;
use ctxt::Ctxt;
use eval::Eval;
use parser::{ast::Expr, Parser};
use value::Value;

/// Parses the source into an expression, without evaluating it.
pub fn parse(source: &str) -> Result<Expr, Vec<Error>> {
    Parser::new(source).try_parse_full()
}

/// Parses and evaluates the source in the given context.
pub fn evaluate(source: &str, ctxt: &Ctxt) -> Result<Value, Vec<Error>> {
    parse(source)?
        .eval(ctxt)
        .map_err(|err| vec![err])
}
