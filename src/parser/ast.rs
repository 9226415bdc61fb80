//! Syntax tree for SVG path data (the `d` attribute)

pub use crate::error::Span;

/// A command letter together with the numbers written after it
///
/// Implicit repetitions (`L 1 2 3 4`) stay in one segment; splitting them
/// into individual commands is left to geometry interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub command: char,
    pub args: Vec<f64>,
    pub span: Span,
}

impl Segment {
    pub fn new(command: char, args: Vec<f64>, span: Span) -> Self {
        Self {
            command,
            args,
            span,
        }
    }

    /// Whether the command uses relative coordinates
    pub fn is_relative(&self) -> bool {
        self.command.is_ascii_lowercase()
    }
}

/// Parsed path data of one path element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    pub segments: Vec<Segment>,
}

impl PathData {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
