//! SVG serializer for reordered documents
//!
//! This module walks a [`Document`] skeleton and writes every node back out.
//! Nodes that were not changed are emitted from their source text; rebuilt
//! tags keep their attribute order.

pub mod config;
mod convert;
pub mod path;

pub use config::OutputConfig;
pub use convert::Conversion;
pub use path::to_svg_d;

use crate::document::{Attribute, Document, Node, PathElement, Tag};
use crate::error::ConversionError;

/// Write a tag with the given attributes
fn write_tag(tag: &Tag, attributes: &[Attribute]) -> String {
    let mut out = format!("<{}", tag.name);
    for attr in attributes {
        // Raw values are already escaped; only the quote needs choosing
        let quote = if attr.value.contains('"') { '\'' } else { '"' };
        out.push_str(&format!(" {}={}{}{}", attr.name, quote, attr.value, quote));
    }
    out.push_str(if tag.self_closing { "/>" } else { ">" });
    out
}

/// Rescaled copy of a tag's attributes, or `None` when nothing changes
fn rescale(tag: &Tag, conversion: &Conversion) -> Option<Vec<Attribute>> {
    let mut changed = false;
    let attributes = tag
        .attributes
        .iter()
        .map(|attr| match conversion.attribute(tag.local_name(), attr) {
            Some(value) => {
                changed = true;
                Attribute::new(attr.name.clone(), value)
            }
            None => attr.clone(),
        })
        .collect();
    changed.then_some(attributes)
}

fn render_path(path: &PathElement, conversion: Option<&Conversion>, precision: usize) -> String {
    let tag = &path.tag;
    let mut out = match (conversion, path.reversed) {
        (None, false) => tag.raw.clone(),
        (None, true) => {
            let d = to_svg_d(&path.data, 1.0, precision);
            let attributes: Vec<Attribute> = tag
                .attributes
                .iter()
                .map(|attr| match attr.name.as_str() {
                    "d" => Attribute::new("d", d.clone()),
                    _ => attr.clone(),
                })
                .collect();
            write_tag(tag, &attributes)
        }
        (Some(conversion), _) => {
            let d = to_svg_d(&path.data, conversion.scale, conversion.precision);
            let attributes: Vec<Attribute> = tag
                .attributes
                .iter()
                .map(|attr| match attr.name.as_str() {
                    "d" => Attribute::new("d", d.clone()),
                    _ => conversion
                        .attribute(tag.local_name(), attr)
                        .map_or_else(|| attr.clone(), |v| Attribute::new(attr.name.clone(), v)),
                })
                .collect();
            write_tag(tag, &attributes)
        }
    };
    if let Some(body) = &path.body {
        out.push_str(body);
    }
    out
}

/// Render a document back to SVG markup
///
/// Paths fill the document's path slots in their current order. With
/// [`OutputConfig::physical`] set, the drawing is rescaled to a physical
/// unit; otherwise untouched markup is reproduced exactly.
pub fn render(doc: &Document, config: &OutputConfig) -> Result<String, ConversionError> {
    let conversion = if config.physical {
        let conversion = Conversion::new(&doc.canvas, config.unit, config.precision)?;
        log::debug!(
            "converting to {}: {} {} per user unit",
            conversion.unit,
            conversion.scale,
            conversion.unit
        );
        Some(conversion)
    } else {
        None
    };

    let mut out = String::new();
    let mut paths = doc.paths.iter();

    for node in &doc.nodes {
        match node {
            Node::Markup(text) => out.push_str(text),
            Node::Root(tag) => match &conversion {
                Some(conversion) => {
                    out.push_str(&write_tag(tag, &conversion.root_attributes(&tag.attributes)))
                }
                None => out.push_str(&tag.raw),
            },
            Node::Element(tag) => {
                match conversion.as_ref().and_then(|c| rescale(tag, c)) {
                    Some(attributes) => out.push_str(&write_tag(tag, &attributes)),
                    None => out.push_str(&tag.raw),
                }
            }
            Node::Path => {
                if let Some(path) = paths.next() {
                    out.push_str(&render_path(path, conversion.as_ref(), config.precision));
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::Strategy;
    use crate::units::Unit;
    use pretty_assertions::assert_eq;

    fn roundtrip(source: &str) -> String {
        let doc = Document::parse(source).unwrap();
        render(&doc, &OutputConfig::default()).unwrap()
    }

    #[test]
    fn test_unchanged_document_roundtrips() {
        let source = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\"  height='50'>\n",
            "  <!-- outline -->\n",
            "  <g transform=\"translate(5 5)\">\n",
            "    <path d=\"M0 0 L10 0\"   stroke=\"black\"/>\n",
            "    <path d=\"M20 0 L30 0\"><title>b &amp; c</title></path>\n",
            "  </g>\n",
            "  <rect x=\"1\" y=\"1\" width=\"2\" height=\"2\"/>\n",
            "</svg>\n"
        );
        assert_eq!(roundtrip(source), source);
    }

    #[test]
    fn test_write_tag_quotes() {
        let tag = Tag {
            name: "path".to_string(),
            attributes: vec![],
            self_closing: true,
            raw: String::new(),
        };
        let out = write_tag(
            &tag,
            &[
                Attribute::new("d", "M0 0"),
                Attribute::new("font-family", "\"Open Sans\""),
            ],
        );
        assert_eq!(out, "<path d=\"M0 0\" font-family='\"Open Sans\"'/>");
    }

    #[test]
    fn test_reversed_path_is_rewritten() {
        let source = r#"<svg><path id="a" d="M0 0 L10 0"/><path id="b" d="M100 0 L90 0" stroke="red"/></svg>"#;
        let mut doc = Document::parse(source).unwrap();
        doc.reorder(Strategy::StartEnd).unwrap();
        let out = render(&doc, &OutputConfig::default()).unwrap();
        assert_eq!(
            out,
            r#"<svg><path id="a" d="M0 0 L10 0"/><path id="b" d="M90 0 L100 0" stroke="red"/></svg>"#
        );
    }

    #[test]
    fn test_physical_conversion() {
        let source = r#"<svg width="96" height="96"><rect x="48" y="0" width="96" height="96" fill="none"/><path d="M96 0 L0 96" stroke-width="9.6"/></svg>"#;
        let doc = Document::parse(source).unwrap();
        let out = render(&doc, &OutputConfig::new().with_physical(true)).unwrap();
        insta::assert_snapshot!(out, @r#"<svg width="1in" height="1in" viewBox="0 0 1 1"><rect x="0.5" y="0" width="1" height="1" fill="none"/><path d="M1 0 L0 1" stroke-width="0.1"/></svg>"#);
    }

    #[test]
    fn test_physical_conversion_to_millimeters() {
        let source = r#"<svg width="96" height="48" viewBox="0 0 96 48"><path d="M0 0 L96 0"/></svg>"#;
        let doc = Document::parse(source).unwrap();
        let config = OutputConfig::new()
            .with_physical(true)
            .with_unit(Unit::Millimeter)
            .with_precision(2);
        let out = render(&doc, &config).unwrap();
        assert_eq!(
            out,
            r#"<svg width="25.4mm" height="12.7mm" viewBox="0 0 25.4 12.7"><path d="M0 0 L25.4 0"/></svg>"#
        );
    }

    #[test]
    fn test_conversion_error_only_when_requested() {
        let source = r#"<svg width="100%" height="100%"><path d="M0 0 L1 1"/></svg>"#;
        let doc = Document::parse(source).unwrap();
        assert_eq!(render(&doc, &OutputConfig::default()).unwrap(), source);
        assert!(matches!(
            render(&doc, &OutputConfig::new().with_physical(true)),
            Err(ConversionError::RelativeDimension(_))
        ));
    }
}
