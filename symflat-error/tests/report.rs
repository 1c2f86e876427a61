use ariadne::Source;
use symflat_attrs::ErrorKind;
use symflat_error::{Error, ErrorKind};

/// A test error with fields used in its message.
#[derive(Debug, ErrorKind)]
#[error(
    message = format!("the `{}` symbol is reserved", self.name),
    labels = ["this assignment"],
    help = "pick a different name",
)]
struct Reserved {
    name: String,
}

/// A test error with no fields and no labels.
#[derive(Debug, ErrorKind)]
#[error(message = "something went wrong")]
struct Plain;

/// Renders the report to a plain string, with color codes removed.
fn render(error: &Error, input: &str) -> String {
    let mut out = Vec::new();
    error
        .build_report("input")
        .write(("input", Source::from(input)), &mut out)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
}

#[test]
fn message_and_help() {
    let kind = Reserved { name: "Pi".to_string() };
    assert_eq!(kind.message(), "the `Pi` symbol is reserved");
    assert_eq!(kind.help().as_deref(), Some("pick a different name"));
}

#[test]
fn report_contains_label() {
    let input = "Pi = 3";
    let error = Error::new(vec![0..6], Reserved { name: "Pi".to_string() });
    let rendered = render(&error, input);
    assert!(rendered.contains("the `Pi` symbol is reserved"));
    assert!(rendered.contains("this assignment"));
    assert!(rendered.contains("pick a different name"));
}

#[test]
fn report_without_spans() {
    let error = Error::new(vec![], Plain);
    assert_eq!(error.to_string(), "something went wrong");
    assert_eq!(Plain.help(), None);
    let rendered = render(&error, "x");
    assert!(rendered.contains("something went wrong"));
}
