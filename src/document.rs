//! In-memory model of an SVG drawing prepared for path reordering
//!
//! A [`Document`] keeps the markup it was parsed from as a skeleton of
//! [`Node`]s so that everything the reorder engine does not touch is written
//! back exactly as it was read. Reorderable paths are lifted out into
//! [`Document::paths`] and leave a [`Node::Path`] slot behind.

use crate::error::{ConversionError, GeometryError};
use crate::geometry::{self, Features, Transform};
use crate::parser::ast::PathData;
use crate::reorder::{self, Strategy, Visit};
use crate::units::{Length, Unit};

/// A single attribute of an element tag
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    /// Value exactly as written in the source, entity references included
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A start or empty-element tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Qualified name, e.g. `path` or `svg:path`
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
    /// Source text of the whole tag, `<` through `>`
    pub raw: String,
}

impl Tag {
    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// One piece of the document skeleton, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text, comments, end tags, declarations: written back verbatim
    Markup(String),
    /// The `<svg>` root start tag
    Root(Tag),
    /// Any other start or empty tag
    Element(Tag),
    /// Slot filled by the next reorderable path of the output order
    Path,
}

/// A reorderable `<path>` element
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    /// Position among the document's reorderable paths, in source order
    pub index: usize,
    /// Identifies the parent element; paths only move within their scope
    pub scope: usize,
    pub tag: Tag,
    /// Children and end tag of a non-empty `<path>...</path>`, verbatim
    pub body: Option<String>,
    pub data: PathData,
    /// Whether `data` was replaced by its reversal
    pub reversed: bool,
}

impl PathElement {
    /// The element's own `transform`, mapping path data into its parent's space
    ///
    /// An unreadable transform is treated as the identity.
    pub fn placement(&self) -> Transform {
        let Some(value) = self.tag.get("transform") else {
            return Transform::identity();
        };
        let parsed = quick_xml::escape::unescape(value)
            .ok()
            .and_then(|v| Transform::parse(&v));
        match parsed {
            Some(transform) => transform,
            None => {
                log::warn!(
                    "path #{}: ignoring unreadable transform '{}'",
                    self.index,
                    value
                );
                Transform::identity()
            }
        }
    }

    /// Same element drawn in the opposite direction
    fn into_reversed(self, data: PathData) -> Self {
        Self {
            data,
            reversed: !self.reversed,
            ..self
        }
    }
}

/// `viewBox` of the root element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a viewBox string like "0 0 100 100"
    pub fn parse(s: &str) -> Result<Self, ConversionError> {
        let parts: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ConversionError::InvalidViewBox(s.to_string()))?;
        match parts.as_slice() {
            [min_x, min_y, width, height] => Ok(ViewBox {
                min_x: *min_x,
                min_y: *min_y,
                width: *width,
                height: *height,
            }),
            _ => Err(ConversionError::InvalidViewBox(s.to_string())),
        }
    }
}

/// Canvas sizing attributes of the root element, as written
///
/// Values are kept raw and only interpreted on demand so that documents
/// with relative or unknown dimensions still pass through unconverted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<String>,
}

impl Canvas {
    pub fn width(&self) -> Result<Option<Length>, ConversionError> {
        self.width.as_deref().map(Length::parse).transpose()
    }

    pub fn height(&self) -> Result<Option<Length>, ConversionError> {
        self.height.as_deref().map(Length::parse).transpose()
    }

    pub fn view_box(&self) -> Result<Option<ViewBox>, ConversionError> {
        self.view_box.as_deref().map(ViewBox::parse).transpose()
    }

    /// Unit the drawing declares through its width (or height)
    ///
    /// Unitless or absent dimensions declare pixels.
    pub fn unit(&self) -> Result<Unit, ConversionError> {
        let declared = match self.width()? {
            Some(length) => Some(length),
            None => self.height()?,
        };
        Ok(declared.map(|l| l.unit).unwrap_or(Unit::Pixel))
    }
}

/// Travel statistics of one reorder run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReorderSummary {
    pub paths: usize,
    pub scopes: usize,
    pub reversed: usize,
    pub travel_before: f64,
    pub travel_after: f64,
}

/// A parsed SVG drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub canvas: Canvas,
    pub nodes: Vec<Node>,
    pub paths: Vec<PathElement>,
}

impl Document {
    /// Parse SVG markup into a document
    pub fn parse(source: &str) -> Result<Self, crate::ParseError> {
        crate::parser::parse(source)
    }

    /// Scopes in order of first appearance, each with the positions of its paths
    pub fn scopes(&self) -> Vec<(usize, Vec<usize>)> {
        let mut scopes: Vec<(usize, Vec<usize>)> = Vec::new();
        for (position, path) in self.paths.iter().enumerate() {
            match scopes.iter_mut().find(|(scope, _)| *scope == path.scope) {
                Some((_, positions)) => positions.push(position),
                None => scopes.push((path.scope, vec![position])),
            }
        }
        scopes
    }

    /// Reorder the paths of every scope to minimize pen travel
    pub fn reorder(&mut self, strategy: Strategy) -> Result<ReorderSummary, GeometryError> {
        let geometries = self
            .paths
            .iter()
            .map(|p| geometry::extract(p.index, &p.data))
            .collect::<Result<Vec<_>, _>>()?;
        let placements: Vec<Transform> = self.paths.iter().map(PathElement::placement).collect();

        let scopes = self.scopes();
        let mut summary = ReorderSummary {
            paths: self.paths.len(),
            ..Default::default()
        };
        let mut slots: Vec<Option<PathElement>> =
            std::mem::take(&mut self.paths).into_iter().map(Some).collect();
        let mut reordered: Vec<Option<PathElement>> = vec![None; slots.len()];

        for (scope, positions) in scopes {
            let features: Vec<Features> = positions
                .iter()
                .map(|&p| placements[p].apply_features(&geometries[p].features))
                .collect();
            let visits = reorder::order(&features, strategy);
            let before = reorder::travel(&features, &Visit::identity(features.len()), strategy);
            let after = reorder::travel(&features, &visits, strategy);
            log::debug!(
                "scope {}: {} paths, travel {:.3} -> {:.3}",
                scope,
                positions.len(),
                before,
                after
            );

            for (slot, visit) in positions.iter().zip(&visits) {
                let source = positions[visit.index];
                let Some(path) = slots[source].take() else {
                    continue;
                };
                let path = if visit.reversed {
                    summary.reversed += 1;
                    path.into_reversed(geometries[source].reversed())
                } else {
                    path
                };
                reordered[*slot] = Some(path);
            }

            summary.scopes += 1;
            summary.travel_before += before;
            summary.travel_after += after;
        }

        self.paths = reordered.into_iter().flatten().collect();
        Ok(summary)
    }
}
