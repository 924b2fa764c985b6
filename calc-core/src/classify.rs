//! Classification of raw input into assignments, graphs and numeric expressions.

use crate::{
    eval::{Evaluation, Failure},
    history::History,
    resolve::resolve,
    variables::Variables,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// A single letter other than `x` and `y`, then `=`, then the assigned expression.
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-wz])\s*=\s*(.*)$").unwrap());

/// An optional leading `y =`.
static GRAPH_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^y\s*=\s*").unwrap());

/// A standalone `x` or `y`.
static GRAPH_VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[xy]\b").unwrap());

/// Why an assignment could not be applied.
#[derive(Debug)]
pub enum AssignmentError {
    /// Nothing follows the `=`.
    EmptyValue,

    /// The assigned expression did not evaluate to a finite number.
    Invalid(Evaluation),
}

/// The kind of an input, along with everything derived from it.
#[derive(Debug)]
pub enum Classified {
    /// The input is empty.
    Empty,

    /// The input assigns a value to a variable, such as `a = 3`.
    Assignment {
        name: char,
        value: Result<f64, AssignmentError>,
    },

    /// The input is a function of `x` to graph. The body has any leading `y =` removed, and is not
    /// resolved yet.
    Graph {
        body: String,
    },

    /// The input is a numeric expression involving trigonometric functions.
    TrigNumeric(Evaluation),

    /// Any other numeric expression.
    Plain(Evaluation),
}

impl Classified {
    /// Returns the finite result of a successful assignment or numeric expression.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Assignment { value: Ok(value), .. } => Some(*value),
            Self::TrigNumeric(eval) | Self::Plain(eval) => eval.finite(),
            _ => None,
        }
    }

    /// Returns true if the input failed to produce what it asked for.
    pub fn is_error(&self) -> bool {
        match self {
            Self::Empty | Self::Graph { .. } => false,
            Self::Assignment { value, .. } => value.is_err(),
            Self::TrigNumeric(eval) | Self::Plain(eval) => eval.finite().is_none(),
        }
    }

    /// Consumes the classification, returning the evaluator's failure, if there was one.
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Self::Assignment { value: Err(AssignmentError::Invalid(eval)), .. }
                | Self::TrigNumeric(eval)
                | Self::Plain(eval) => eval.into_failure(),
            _ => None,
        }
    }
}

/// Returns the body of a graph input: the input without a leading `y =`.
pub fn graph_body(input: &str) -> &str {
    GRAPH_PREFIX
        .find(input)
        .map_or(input, |prefix| &input[prefix.end()..])
}

/// Returns true if the input is a graph equation.
fn is_graph(input: &str) -> bool {
    GRAPH_VARIABLE.is_match(graph_body(input))
        || input.contains("y=")
        || input.contains("y =")
}

/// Returns true if the input mentions a trigonometric function and nothing graphable.
fn is_trig_numeric(input: &str) -> bool {
    ["sin", "cos", "tan"].iter().any(|name| input.contains(name))
        && !input.contains(|c: char| c == 'x' || c == 'y')
}

/// Classifies the input and evaluates it against the given variables and history.
///
/// The first matching kind wins: assignment, graph, trigonometric numeric expression, plain
/// numeric expression. Nothing is modified, so this is used both for previews and commits.
pub fn classify(input: &str, variables: &Variables, history: &History) -> Classified {
    let input = input.trim();
    if input.is_empty() {
        return Classified::Empty;
    }

    if let Some(caps) = ASSIGNMENT.captures(input) {
        let name = caps[1].chars().next().unwrap_or_default();
        let rhs = caps[2].trim();
        let value = if rhs.is_empty() {
            Err(AssignmentError::EmptyValue)
        } else {
            let eval = Evaluation::of(&resolve(rhs, variables, history));
            eval.finite().ok_or(AssignmentError::Invalid(eval))
        };
        return Classified::Assignment { name, value };
    }

    if is_graph(input) {
        return Classified::Graph { body: graph_body(input).to_string() };
    }

    let eval = Evaluation::of(&resolve(input, variables, history));
    if is_trig_numeric(input) {
        Classified::TrigNumeric(eval)
    } else {
        Classified::Plain(eval)
    }
}
