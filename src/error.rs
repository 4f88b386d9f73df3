use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

/// Every way an evaluation can fail on user input. All of these are
/// recoverable: the caller reports them and keeps its prompt alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    UnbalancedParens,
    MalformedLiteral,
    MissingOperator,
    UnsupportedOperator,
    EmptyRange,
    DivisionByZero,
}

#[derive(Debug, Clone)]
pub struct SdbxError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl SdbxError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, span, message)
    }

    pub fn unbalanced_parens(span: Span, message: String) -> Self {
        Self::new(ErrorKind::UnbalancedParens, span, message)
    }

    pub fn malformed_literal(span: Span, message: String) -> Self {
        Self::new(ErrorKind::MalformedLiteral, span, message)
    }

    pub fn missing_operator(span: Span, message: String) -> Self {
        Self::new(ErrorKind::MissingOperator, span, message)
    }

    pub fn unsupported_operator(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::UnsupportedOperator, span, message, help)
    }

    pub fn empty_range(span: Span, message: String) -> Self {
        Self::new(ErrorKind::EmptyRange, span, message)
    }

    pub fn division_by_zero(span: Span, message: String) -> Self {
        Self::new(ErrorKind::DivisionByZero, span, message)
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<sdbx>");

        let color = match self.kind {
            ErrorKind::LexError => Color::Red,
            ErrorKind::DivisionByZero => Color::Magenta,
            _ => Color::Yellow,
        };

        let kind_str = match self.kind {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::UnbalancedParens => "Unbalanced Parentheses",
            ErrorKind::MalformedLiteral => "Malformed Literal",
            ErrorKind::MissingOperator => "Missing Operator",
            ErrorKind::UnsupportedOperator => "Unsupported Operator",
            ErrorKind::EmptyRange => "Empty Expression",
            ErrorKind::DivisionByZero => "Division By Zero",
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        // Add help note if available
        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .print((filename, Source::from(source)))
            .unwrap();
    }
}

impl fmt::Display for SdbxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SdbxError {}
