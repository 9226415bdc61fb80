//! Geometry extraction: from parsed path data to positional features

pub mod command;
mod features;
mod reverse;
pub mod transform;
mod types;

pub use command::{interpret, Command};
pub use features::{features, CURVE_STEPS};
pub use reverse::reverse;
pub use transform::Transform;
pub use types::{Features, Point};

use crate::error::GeometryError;
use crate::parser::ast::PathData;

/// Interpreted geometry of one path, with its features cached
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub commands: Vec<Command>,
    pub features: Features,
}

impl Geometry {
    /// Path data drawing this geometry in the opposite direction
    pub fn reversed(&self) -> PathData {
        reverse(&self.commands)
    }
}

/// Interpret a path and compute its features
///
/// `index` identifies the path in errors. Path data is never empty here:
/// paths without data stay opaque and are not extracted.
pub fn extract(index: usize, data: &PathData) -> Result<Geometry, GeometryError> {
    let commands = interpret(index, data)?;
    let features = match features(&commands) {
        Some(features) => features,
        None => {
            let span = data.segments.first().map(|s| s.span.clone()).unwrap_or(0..0);
            return Err(GeometryError::MissingMoveTo {
                path: index,
                command: data.segments.first().map_or(' ', |s| s.command),
                span,
            });
        }
    };
    Ok(Geometry { commands, features })
}
