use ariadne::Source;
use calc_attrs::ErrorKind;
use calc_error::Error;

/// The variable is undefined.
#[derive(Debug, ErrorKind)]
#[error(
    message = format!("`{}` is not defined", self.name),
    labels = ["this variable"],
    help = "assign it first, e.g. `a = 3`",
)]
struct UndefinedVariable {
    name: String,
}

/// An operator is missing its right-hand side.
#[derive(Debug, ErrorKind)]
#[error(message = "unexpected end of expression", labels = ["", "here"])]
struct MissingOperand;

/// Renders the report for the given error without color codes.
fn render(err: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(source)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn message_uses_fields() {
    let err = Error::new(vec![4..5], UndefinedVariable { name: "q".to_string() });
    assert_eq!(err.to_string(), "`q` is not defined");
}

#[test]
fn report_contains_message_label_and_help() {
    let err = Error::new(vec![4..5], UndefinedVariable { name: "q".to_string() });
    let report = render(&err, "2 + q");
    assert!(report.contains("`q` is not defined"));
    assert!(report.contains("this variable"));
    assert!(report.contains("assign it first"));
}

#[test]
fn unit_struct_with_multiple_spans() {
    let err = Error::new(vec![0..1, 2..3], MissingOperand);
    let report = render(&err, "1 +");
    assert!(report.contains("unexpected end of expression"));
    assert!(report.contains("here"));
}
