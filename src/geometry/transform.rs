//! Affine transforms written in `transform` attributes

use super::{Features, Point};

/// The matrix `[a c e; b d f; 0 0 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees` about the origin
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self` applied after `other`
    pub fn then_after(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn apply_features(&self, features: &Features) -> Features {
        Features {
            start: self.apply(features.start),
            end: self.apply(features.end),
            centroid: self.apply(features.centroid),
        }
    }

    /// Parse a transform list such as `translate(10 20) rotate(45)`
    ///
    /// Functions apply right to left, as in SVG. Returns `None` for anything
    /// malformed.
    pub fn parse(value: &str) -> Option<Transform> {
        let mut result = Transform::identity();
        for (name, args) in functions(value)? {
            let step = match (name, args.as_slice()) {
                ("matrix", &[a, b, c, d, e, f]) => Transform::new(a, b, c, d, e, f),
                ("translate", &[tx]) => Transform::translate(tx, 0.0),
                ("translate", &[tx, ty]) => Transform::translate(tx, ty),
                ("scale", &[s]) => Transform::scale(s, s),
                ("scale", &[sx, sy]) => Transform::scale(sx, sy),
                ("rotate", &[angle]) => Transform::rotate(angle),
                ("rotate", &[angle, cx, cy]) => Transform::translate(cx, cy)
                    .then_after(&Transform::rotate(angle))
                    .then_after(&Transform::translate(-cx, -cy)),
                ("skewX", &[angle]) => {
                    Transform::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0)
                }
                ("skewY", &[angle]) => {
                    Transform::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
                }
                _ => return None,
            };
            result = result.then_after(&step);
        }
        Some(result)
    }
}

/// Split a transform list into function names and their arguments
pub fn functions(value: &str) -> Option<Vec<(&str, Vec<f64>)>> {
    let mut result = Vec::new();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        result.push((name, split_numbers(&rest[open + 1..close])?));
        rest = rest[close + 1..].trim_start();
    }
    Some(result)
}

/// Numbers separated by whitespace and/or commas
pub fn split_numbers(value: &str) -> Option<Vec<f64>> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect()
}
