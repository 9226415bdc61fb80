//! svg-reorder - Reorder SVG paths to minimize plotter pen travel
//!
//! This library parses an SVG drawing, computes a visiting order for its
//! paths that keeps the idle distance between consecutive paths short, and
//! writes the drawing back out in that order, optionally rescaled to a
//! physical unit.
//!
//! # Example
//!
//! ```rust
//! use svg_reorder::{reorder, Strategy};
//!
//! let svg = reorder(
//!     r#"<svg><path d="M0 0 L10 0"/><path d="M100 0 L90 0"/></svg>"#,
//!     Strategy::StartEnd,
//!     false,
//! )
//! .unwrap();
//! assert!(svg.contains(r#"d="M90 0 L100 0""#));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod renderer;
pub mod reorder;
pub mod units;

pub use config::{ConfigError, ReorderConfig};
pub use document::{Document, ReorderSummary};
pub use error::{ConversionError, GeometryError, ParseError, SyntaxError};
pub use renderer::{render, OutputConfig};
pub use reorder::{Strategy, UnknownStrategy};
pub use units::{Length, Unit};

use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during the reorder pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReorderError {
    /// The markup or a path's data could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A path command could not be interpreted
    #[error("unsupported geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Rescaling to physical units failed
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

impl ReorderError {
    /// Format the error with source context using ariadne
    ///
    /// Geometry errors are reported against the path data they occur in.
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ReorderError::Parse(e) => e.format(source, filename),
            ReorderError::Geometry(e) => {
                let data = Document::parse(source).ok().and_then(|doc| {
                    doc.paths
                        .get(e.path())
                        .and_then(|p| p.tag.get("d"))
                        .and_then(|d| quick_xml::escape::unescape(d).ok())
                        .map(|d| d.into_owned())
                });
                match data {
                    Some(data) => error::report(
                        &data,
                        &format!("{}#path{}", filename, e.path()),
                        e.span(),
                        &e.to_string(),
                        "",
                    ),
                    None => self.to_string(),
                }
            }
            ReorderError::Conversion(_) => format!("{}: {}", filename, self),
        }
    }
}

/// Reorder the paths of an SVG document
///
/// This is the main entry point for the library. It parses the source,
/// orders the paths with `strategy` and serializes the result, rescaled to
/// physical units when `physical` is set.
pub fn reorder(source: &str, strategy: Strategy, physical: bool) -> Result<String, ReorderError> {
    reorder_with_config(
        source,
        &ReorderConfig::new()
            .with_strategy(strategy)
            .with_physical(physical),
    )
}

/// Reorder the paths of an SVG document with custom configuration
///
/// # Example
///
/// ```rust
/// use svg_reorder::{reorder_with_config, OutputConfig, ReorderConfig, Strategy, Unit};
///
/// let config = ReorderConfig::new()
///     .with_strategy(Strategy::Centroid)
///     .with_output(OutputConfig::new().with_physical(true).with_unit(Unit::Inch));
///
/// let svg = reorder_with_config(r#"<svg width="96" height="96"/>"#, &config).unwrap();
/// assert!(svg.contains(r#"width="1in""#));
/// ```
pub fn reorder_with_config(source: &str, config: &ReorderConfig) -> Result<String, ReorderError> {
    let mut doc = Document::parse(source)?;

    let summary = doc.reorder(config.strategy)?;
    log::debug!(
        "reordered {} paths in {} scopes with {}: travel {:.3} -> {:.3}, {} reversed",
        summary.paths,
        summary.scopes,
        config.strategy,
        summary.travel_before,
        summary.travel_after,
        summary.reversed
    );

    Ok(render(&doc, &config.output)?)
}

/// Reorder several documents in parallel
///
/// Each document gets its own result; a failing document does not affect
/// the others.
pub fn reorder_batch(sources: &[&str], config: &ReorderConfig) -> Vec<Result<String, ReorderError>> {
    sources
        .par_iter()
        .map(|source| reorder_with_config(source, config))
        .collect()
}
