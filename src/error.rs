//! Error types for parsing, geometry interpretation and unit conversion

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A syntax error inside a single `d` attribute
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {span:?}")]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub fn unexpected_character(data: &str, span: Span) -> Self {
        let found = data.get(span.clone()).unwrap_or_default();
        Self {
            span,
            message: format!("Unexpected character '{}'", found),
            expected: vec![],
        }
    }
}

/// The document could not be read as an SVG drawing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("document has no <svg> root element")]
    MissingRoot,

    #[error("invalid markup at byte {position}: {message}")]
    Markup { position: usize, message: String },

    #[error("invalid path data in path #{path}: {}", format_syntax_errors(.errors))]
    PathData {
        /// Document-order index of the offending path
        path: usize,
        /// Value of its `d` attribute
        data: String,
        errors: Vec<SyntaxError>,
    },
}

impl ParseError {
    pub fn markup(position: usize, message: impl Into<String>) -> Self {
        Self::Markup {
            position,
            message: message.into(),
        }
    }
}

/// A path command that parsed but cannot be interpreted as geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("path #{path}: unsupported command '{command}' at {span:?}")]
    UnsupportedCommand {
        path: usize,
        command: char,
        span: Span,
    },

    #[error("path #{path}: command '{command}' takes arguments in groups of {arity}, found {found}")]
    ArgumentCount {
        path: usize,
        command: char,
        arity: usize,
        found: usize,
        span: Span,
    },

    #[error("path #{path}: arc flags must be 0 or 1 at {span:?}")]
    InvalidArcFlag { path: usize, span: Span },

    #[error("path #{path}: path data must begin with a moveto, found '{command}'")]
    MissingMoveTo {
        path: usize,
        command: char,
        span: Span,
    },
}

impl GeometryError {
    /// Span of the offending segment inside the path's `d` attribute
    pub fn span(&self) -> Span {
        match self {
            GeometryError::UnsupportedCommand { span, .. }
            | GeometryError::ArgumentCount { span, .. }
            | GeometryError::InvalidArcFlag { span, .. }
            | GeometryError::MissingMoveTo { span, .. } => span.clone(),
        }
    }

    /// Document-order index of the offending path
    pub fn path(&self) -> usize {
        match self {
            GeometryError::UnsupportedCommand { path, .. }
            | GeometryError::ArgumentCount { path, .. }
            | GeometryError::InvalidArcFlag { path, .. }
            | GeometryError::MissingMoveTo { path, .. } => *path,
        }
    }
}

/// Physical-dimension rescaling failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("invalid length '{0}'")]
    InvalidLength(String),

    #[error("cannot convert relative dimension '{0}' to a physical unit")]
    RelativeDimension(String),

    #[error("canvas has neither width/height nor a viewBox")]
    MissingDimensions,

    #[error("invalid viewBox '{0}'")]
    InvalidViewBox(String),
}

fn format_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a diagnostic with source context using ariadne
pub(crate) fn report(source: &str, filename: &str, span: Span, message: &str, note: &str) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span))
                .with_message(format!("{}{}", message, note))
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);

    match written {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => message.to_string(),
    }
}

impl ParseError {
    /// Format the error with source context using ariadne
    ///
    /// Path data errors are reported against the `d` attribute they occur in.
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::MissingRoot => self.to_string(),
            ParseError::Markup { position, message } => {
                let end = (*position + 1).min(source.len());
                let start = (*position).min(end);
                report(source, filename, start..end, message, "")
            }
            ParseError::PathData { path, data, errors } => {
                let name = format!("{}#path{}", filename, path);
                errors
                    .iter()
                    .map(|e| {
                        let note = if e.expected.is_empty() {
                            String::new()
                        } else {
                            format!("\nExpected: {}", e.expected.join(", "))
                        };
                        report(data, &name, e.span.clone(), &e.message, &note)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for SyntaxError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of path data".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of path data".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        SyntaxError {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Command(c) => format!("command '{}'", c),
        Token::Number(n) => format!("number {}", n),
        Token::Comma => "','".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::markup(12, "unclosed element <g>");
        assert_eq!(err.to_string(), "invalid markup at byte 12: unclosed element <g>");
        assert_eq!(
            ParseError::MissingRoot.to_string(),
            "document has no <svg> root element"
        );
    }

    #[test]
    fn test_geometry_error_accessors() {
        let err = GeometryError::UnsupportedCommand {
            path: 3,
            command: 'X',
            span: 4..5,
        };
        assert_eq!(err.path(), 3);
        assert_eq!(err.span(), 4..5);
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_format_path_data_error_mentions_path() {
        let err = ParseError::PathData {
            path: 0,
            data: "M 0 0 L ,".to_string(),
            errors: vec![SyntaxError {
                span: 8..9,
                message: "Unexpected ','".to_string(),
                expected: vec!["number".to_string()],
            }],
        };
        let formatted = err.format("<svg/>", "drawing.svg");
        assert!(formatted.contains("Unexpected ','"));
        assert!(formatted.contains("drawing.svg#path0"));
    }

    #[test]
    fn test_format_markup_error_at_end_of_source() {
        let err = ParseError::markup(6, "unclosed element <svg>");
        let formatted = err.format("<svg>\n", "broken.svg");
        assert!(formatted.contains("unclosed element <svg>"));
    }
}
