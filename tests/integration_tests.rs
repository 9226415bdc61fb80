//! Integration tests for the reorder pipeline on fixture drawings

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use svg_reorder::geometry::{self, Features};
use svg_reorder::{
    reorder, reorder_batch, reorder_with_config, ConversionError, Document, GeometryError,
    ParseError, ReorderConfig, ReorderError, Strategy,
};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}

/// Ids of the reorderable paths, in document order
fn path_ids(svg: &str) -> Vec<String> {
    Document::parse(svg)
        .expect("Should parse")
        .paths
        .iter()
        .map(|p| p.tag.get("id").unwrap_or("").to_string())
        .collect()
}

/// Features of every reorderable path, sorted by id
fn features_by_id(svg: &str) -> Vec<(String, Features)> {
    let doc = Document::parse(svg).expect("Should parse");
    let mut features: Vec<(String, Features)> = doc
        .paths
        .iter()
        .map(|p| {
            let id = p.tag.get("id").unwrap_or("").to_string();
            let geometry = geometry::extract(p.index, &p.data).expect("Should extract");
            (id, geometry.features)
        })
        .collect();
    features.sort_by(|a, b| a.0.cmp(&b.0));
    features
}

fn assert_same_geometry(input: &str, output: &str) {
    let before = features_by_id(input);
    let after = features_by_id(output);
    assert_eq!(before.len(), after.len());
    for ((id, b), (id_after, a)) in before.iter().zip(&after) {
        assert_eq!(id, id_after);
        let natural = a.start == b.start && a.end == b.end;
        let reversed = a.start == b.end && a.end == b.start;
        assert!(natural || reversed, "path {} changed endpoints", id);
        assert!(
            a.centroid.distance(b.centroid) < 1e-6,
            "path {} moved its centroid",
            id
        );
    }
}

#[test]
fn test_start_end_orders_each_group() {
    let input = fixture("plot.svg");
    let output = reorder(&input, Strategy::StartEnd, false).expect("Should reorder");

    assert_eq!(
        path_ids(&output),
        vec!["l1", "l3", "l2", "l4", "r1", "r3", "r2"]
    );
    assert!(output.contains(r#"<path id="l2" d="M160 10 L200 10"/>"#));
    assert!(output.contains(r#"<path id="l4" d="M160 100 C140 120 120 80 100 100"/>"#));
    assert!(output.contains(r#"<path id="r2" d="M50 280 A20 20 0 0 0 10 280"/>"#));
    // Paths that keep their direction are written as authored
    assert!(output.contains(r#"<path id="l3" d="m 55 12 l 40 0"/>"#));
}

#[test]
fn test_centroid_orders_without_reversing() {
    let input = fixture("plot.svg");
    let output = reorder(&input, Strategy::Centroid, false).expect("Should reorder");

    assert_eq!(
        path_ids(&output),
        vec!["l1", "l3", "l4", "l2", "r1", "r3", "r2"]
    );
    assert!(output.contains(r#"<path id="l2" d="M200 10 L160 10"/>"#));
    assert!(output.contains(r#"<path id="r2" d="M10 280 A 20 20 0 0 1 50 280"/>"#));
}

#[test]
fn test_reorder_preserves_paths_and_geometry() {
    let input = fixture("plot.svg");
    for strategy in [Strategy::StartEnd, Strategy::Centroid] {
        let output = reorder(&input, strategy, false).expect("Should reorder");
        assert_eq!(
            output.matches("<path").count(),
            input.matches("<path").count()
        );
        assert_same_geometry(&input, &output);
    }
}

#[test]
fn test_non_path_content_is_untouched() {
    let input = fixture("plot.svg");
    let output = reorder(&input, Strategy::StartEnd, false).expect("Should reorder");
    for line in [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        "<!-- Pen plot: strokes drawn in the order they were authored -->",
        r#"<clipPath id="frame"><path d="M0 0 H400 V300 H0 Z"/></clipPath>"#,
        r##"<rect x="0" y="0" width="400" height="300" fill="none" stroke="#ccc"/>"##,
        r#"<g id="right" transform="translate(200 0)" stroke="blue" fill="none">"#,
    ] {
        assert!(output.contains(line), "missing {}", line);
    }
}

#[test]
fn test_reorder_is_deterministic() {
    let input = fixture("plot.svg");
    for strategy in [Strategy::StartEnd, Strategy::Centroid] {
        let first = reorder(&input, strategy, true).expect("Should reorder");
        let second = reorder(&input, strategy, true).expect("Should reorder");
        assert_eq!(first, second);
    }
}

#[test]
fn test_start_end_travel_never_increases() {
    let input = fixture("plot.svg");
    let mut doc = Document::parse(&input).expect("Should parse");
    let summary = doc.reorder(Strategy::StartEnd).expect("Should reorder");
    assert_eq!(summary.paths, 7);
    assert_eq!(summary.scopes, 2);
    assert!(summary.travel_after <= summary.travel_before);
}

#[test]
fn test_ordered_document_roundtrips_byte_for_byte() {
    let input = fixture("ordered.svg");
    let output = reorder(&input, Strategy::StartEnd, false).expect("Should reorder");
    assert_eq!(output, input);
}

#[test]
fn test_physical_keeps_declared_unit() {
    let input = fixture("a4.svg");
    let output = reorder(&input, Strategy::StartEnd, true).expect("Should reorder");
    assert!(output.contains(r#"width="210mm" height="297mm" viewBox="0 0 210 297""#));
    assert!(output.contains(r#"<path id="near" d="M20 20 L10 10"/>"#));
    assert!(output.contains(r#"<circle cx="105" cy="148.5" r="50" stroke-width="0.3"/>"#));
    assert_eq!(path_ids(&output), vec!["far", "near"]);
}

#[test]
fn test_physical_unit_override() {
    let input = fixture("ordered.svg");
    let config = ReorderConfig::from_str("[output]\nphysical = true\nunit = \"in\"\n")
        .expect("Should load config");
    let output = reorder_with_config(&input, &config).expect("Should reorder");
    assert!(output.contains(r#"width="1in" height="1in""#));
    assert!(output.contains(r#"viewBox="0 0 1 1""#));
    // Style strings are passed through
    assert!(output.contains(r#"style="stroke:#000;stroke-width:0.5""#));
}

#[test]
fn test_batch_isolates_failures() {
    let plot = fixture("plot.svg");
    let a4 = fixture("a4.svg");
    let sources = [
        plot.as_str(),
        "<svg><g></svg>",
        a4.as_str(),
        r#"<svg><path d="M0 0 A 1 1 0 2 0 5 5"/></svg>"#,
    ];
    let results = reorder_batch(&sources, &ReorderConfig::default());

    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0].as_ref().ok(),
        Some(&reorder(&plot, Strategy::StartEnd, false).unwrap())
    );
    assert!(matches!(
        results[1],
        Err(ReorderError::Parse(ParseError::Markup { .. }))
    ));
    assert!(results[2].is_ok());
    assert!(matches!(
        results[3],
        Err(ReorderError::Geometry(GeometryError::InvalidArcFlag { path: 0, .. }))
    ));
}

#[test]
fn test_error_taxonomy() {
    assert!(matches!(
        reorder("", Strategy::StartEnd, false),
        Err(ReorderError::Parse(ParseError::MissingRoot))
    ));
    assert!(matches!(
        reorder(r#"<svg><path d="M0 0 L 1 ; 2"/></svg>"#, Strategy::StartEnd, false),
        Err(ReorderError::Parse(ParseError::PathData { path: 0, .. }))
    ));
    assert!(matches!(
        reorder(r#"<svg><path d="L 1 2"/></svg>"#, Strategy::Centroid, false),
        Err(ReorderError::Geometry(GeometryError::MissingMoveTo { .. }))
    ));
    assert!(matches!(
        reorder(
            r#"<svg width="12furlong" height="1"><path d="M0 0 L1 1"/></svg>"#,
            Strategy::StartEnd,
            true
        ),
        Err(ReorderError::Conversion(ConversionError::UnknownUnit(_)))
    ));
}

#[test]
fn test_error_reports_point_at_source() {
    let source = "<svg>\n  <path d=\"M0 0 L 1 ; 2\"/>\n</svg>\n";
    let err = reorder(source, Strategy::StartEnd, false).unwrap_err();
    let report = err.format(source, "broken.svg");
    assert!(report.contains("broken.svg#path0"));
    assert!(report.contains("Unexpected character ';'"));
}
