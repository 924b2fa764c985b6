//! Substitution of variables and history references into an expression.
//!
//! Resolution is purely textual and happens in a single pass: a variable whose value is
//! substituted is never resolved again, and variables cannot refer to other variables. A
//! reference directly touching a digit or letter, as in `2a`, is not a whole word and is left
//! alone.

use crate::{history::History, variables::Variables};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches a single-letter identifier.
static VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]\b").unwrap());

/// Matches `ans` or `ans<id>`.
static ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bans([0-9]*)\b").unwrap());

/// Wraps negative values in parentheses, so that substituting `-3` into `a^2` gives `(-3)^2`.
fn substitution(text: &str) -> String {
    if text.starts_with('-') {
        format!("({})", text)
    } else {
        text.to_string()
    }
}

/// Substitutes variables, `ans` and `ans<id>` into the expression, and aliases `ln(` to
/// `log(`.
///
/// `ans` is the result of the entry with the largest id, and `ans<id>` the result of the entry
/// with that id. References to undefined variables or missing entries are left as is, so the
/// evaluator can report them.
pub fn resolve(expr: &str, variables: &Variables, history: &History) -> String {
    let aliased = expr.replace("ln(", "log(");

    let with_variables = VARIABLE.replace_all(&aliased, |caps: &Captures| {
        let matched = &caps[0];
        matched
            .chars()
            .next()
            .and_then(|name| variables.get(name))
            .map_or_else(|| matched.to_string(), |value| substitution(&value.to_string()))
    });

    ANSWER
        .replace_all(&with_variables, |caps: &Captures| {
            let entry = match &caps[1] {
                "" => history.latest(),
                id => id.parse().ok().and_then(|id| history.get(id)),
            };
            entry.map_or_else(|| caps[0].to_string(), |entry| substitution(&entry.result))
        })
        .into_owned()
}
