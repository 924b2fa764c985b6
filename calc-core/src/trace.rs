//! Step-by-step simplification of parenthesized groups, for display in the history.

use crate::{
    eval::Evaluation,
    fmt::format_number,
    history::{History, SEPARATOR},
    resolve::resolve,
    variables::Variables,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// The most steps recorded for one input.
pub const MAX_STEPS: usize = 64;

/// A parenthesized group that contains no other parentheses.
static INNERMOST_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

/// Returns true if the character can be part of a number or an identifier.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Returns true if the group starting at `open` is the argument list of a function call, such as
/// the `(30)` in `sin(30)`.
fn is_call(expr: &str, open: usize) -> bool {
    let name_start = expr[..open]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i);

    name_start
        .and_then(|start| expr[start..].chars().next())
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
}

/// Builds the text that replaces the group spanning `range` once it has evaluated to `value`.
///
/// The argument list of a call keeps its parentheses. Otherwise, a negative value keeps its
/// parentheses, and a `*` is inserted wherever the value would merge with a neighboring number
/// or name.
fn replacement(expr: &str, range: &Range<usize>, value: f64, precision: usize) -> String {
    let formatted = format_number(value, precision);
    if is_call(expr, range.start) || value < 0.0 {
        return format!("({})", formatted);
    }

    let before = expr[..range.start].chars().next_back().map_or(false, is_word_char);
    let after = expr[range.end..].chars().next().map_or(false, is_word_char);
    format!(
        "{}{}{}",
        if before { "*" } else { "" },
        formatted,
        if after { "*" } else { "" },
    )
}

/// Reduces the first innermost group that evaluates to a finite number and changes the
/// expression. Returns [`None`] if no group can be reduced.
fn reduce_once(expr: &str, variables: &Variables, history: &History, precision: usize) -> Option<String> {
    INNERMOST_GROUP.captures_iter(expr).find_map(|caps| {
        let group = caps.get(0)?;
        let content = caps.get(1)?.as_str();

        let value = Evaluation::of(&resolve(content, variables, history)).finite()?;
        let text = replacement(expr, &group.range(), value, precision);
        if text == group.as_str() {
            return None;
        }

        Some(format!("{}{}{}", &expr[..group.start()], text, &expr[group.end()..]))
    })
}

/// Returns the intermediate states of the expression, produced by repeatedly replacing the first
/// reducible innermost parenthesized group with its value.
///
/// Groups that fail to evaluate are skipped. The returned steps do not include the input itself,
/// and are empty if nothing could be reduced. At most [`MAX_STEPS`] steps are produced.
pub fn trace(input: &str, variables: &Variables, history: &History, precision: usize) -> Vec<String> {
    let mut steps = Vec::new();
    let mut current = input.trim().to_string();

    while steps.len() < MAX_STEPS {
        let Some(next) = reduce_once(&current, variables, history, precision) else {
            break;
        };
        steps.push(next.clone());
        current = next;
    }

    steps
}

/// Joins the input and its simplification steps for display.
pub fn display_expression(input: &str, steps: &[String]) -> String {
    std::iter::once(input)
        .chain(steps.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn steps(input: &str) -> Vec<String> {
        trace(input, &Variables::new(), &History::new(100), 14)
    }

    #[test]
    fn innermost_first() {
        assert_eq!(steps("(2+3)*4"), vec!["5*4"]);
        assert_eq!(steps("((1+1)*3)^2"), vec!["(2*3)^2", "6^2"]);
        assert_eq!(steps("(1+2)+(3+4)"), vec!["3+(3+4)", "3+7"]);
    }

    #[test]
    fn nothing_to_reduce() {
        assert!(steps("2+3").is_empty());
        assert!(steps("(2)").len() == 1);
        assert!(steps("sin(30)").is_empty());
        assert_eq!(display_expression("2+3", &[]), "2+3");
    }

    #[test]
    fn keeps_tokens_apart() {
        assert_eq!(steps("2(1+2)"), vec!["2*3"]);
        assert_eq!(steps("(1+2)4"), vec!["3*4"]);
        assert_eq!(steps("(1+2)(3+4)"), vec!["3(3+4)", "3*7"]);
        assert_eq!(steps("2(3-8)"), vec!["2(-5)"]);
    }

    #[test]
    fn call_arguments_keep_parentheses() {
        assert_eq!(steps("sin(1+2)*2"), vec!["sin(3)*2"]);
        assert_eq!(steps("sqrt((2+2)*4)"), vec!["sqrt(4*4)", "sqrt(16)"]);
    }

    #[test]
    fn skips_unevaluable_groups() {
        assert_eq!(steps("(q+1)*(2+2)"), vec!["(q+1)*4"]);
        assert_eq!(steps("max(1, 2) + (1+1)"), vec!["max(1, 2) + 2"]);
    }

    #[test]
    fn resolves_variables_inside_groups() {
        let mut vars = Variables::new();
        vars.set('a', 4.0);
        assert_eq!(trace("(a+1)*2", &vars, &History::new(100), 14), vec!["5*2"]);
    }

    #[test]
    fn step_count_is_bounded() {
        let nested = format!("{}2{}", "(".repeat(100), ")".repeat(100));
        let nested_steps = steps(&nested);
        assert_eq!(nested_steps.len(), MAX_STEPS);
        assert_eq!(Evaluation::of(nested_steps.last().unwrap()).finite(), Some(2.0));

        let args = format!("max({}1)", "(1),".repeat(100));
        let arg_steps = steps(&args);
        assert_eq!(arg_steps.len(), MAX_STEPS);
        assert_eq!(Evaluation::of(arg_steps.last().unwrap()).finite(), Some(1.0));
    }

    #[test]
    fn display_joins_steps() {
        assert_eq!(
            display_expression("(2+3)*4", &steps("(2+3)*4")),
            "(2+3)*4 → 5*4",
        );
    }
}
