//! Start, end and centroid extraction
//!
//! The centroid is the arc-length-weighted average of chord midpoints over
//! the flattened outline. Lines contribute exactly; curves and arcs are
//! sampled at [`CURVE_STEPS`] evenly spaced parameters. Paths of zero length
//! fall back to the plain average of the points they visit.

use std::f64::consts::PI;

use super::{Command, Features, Point};

/// Samples per curve or arc when flattening
pub const CURVE_STEPS: usize = 16;

/// Compute the features of an interpreted command sequence
///
/// Returns `None` when the sequence visits no point at all.
pub fn features(commands: &[Command]) -> Option<Features> {
    let start = match commands.first() {
        Some(Command::MoveTo(p)) => *p,
        _ => return None,
    };

    let mut current = start;
    let mut subpath_start = start;
    let mut vertices = Vec::new();
    let mut weighted = Point::origin();
    let mut total_length = 0.0;

    let mut add_chord = |from: Point, to: Point| {
        let length = from.distance(to);
        let mid = from.midpoint(to);
        weighted.x += mid.x * length;
        weighted.y += mid.y * length;
        total_length += length;
    };

    for command in commands {
        match *command {
            Command::MoveTo(p) => {
                subpath_start = p;
                current = p;
                vertices.push(p);
                continue;
            }
            Command::Close => {
                add_chord(current, subpath_start);
                current = subpath_start;
                continue;
            }
            _ => {}
        }

        let points = flatten(current, command);
        let mut from = current;
        for to in points {
            add_chord(from, to);
            from = to;
        }
        if let Some(end) = command.end() {
            vertices.push(end);
            current = end;
        }
    }

    let centroid = if total_length > 0.0 {
        Point::new(weighted.x / total_length, weighted.y / total_length)
    } else {
        let n = vertices.len() as f64;
        let sum = vertices
            .iter()
            .fold(Point::origin(), |acc, p| acc.offset(p.x, p.y));
        Point::new(sum.x / n, sum.y / n)
    };

    Some(Features {
        start,
        end: current,
        centroid,
    })
}

/// Points along a drawing command, excluding `from` and ending at its end point
fn flatten(from: Point, command: &Command) -> Vec<Point> {
    match *command {
        Command::LineTo(p) => vec![p],
        Command::CubicTo { ctrl1, ctrl2, end } => (1..=CURVE_STEPS)
            .map(|i| cubic_at(from, ctrl1, ctrl2, end, i as f64 / CURVE_STEPS as f64))
            .collect(),
        Command::QuadTo { ctrl, end } => (1..=CURVE_STEPS)
            .map(|i| quad_at(from, ctrl, end, i as f64 / CURVE_STEPS as f64))
            .collect(),
        Command::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            end,
        } => arc_points(from, rx, ry, rotation, large_arc, sweep, end),
        Command::MoveTo(_) | Command::Close => vec![],
    }
}

fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn quad_at(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Signed angle from vector `u` to vector `v`
fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

/// Sample an SVG elliptical arc via its center parameterization
///
/// Degenerate arcs (zero radius) are straight lines; coincident endpoints
/// draw nothing. Radii too small to span the endpoints are scaled up.
fn arc_points(
    from: Point,
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<Point> {
    if from == to {
        return vec![];
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        return vec![to];
    }

    let phi = rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let numerator = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let denominator = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (numerator / denominator).max(0.0).sqrt();
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let theta1 = angle_between(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut delta = angle_between(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    );
    if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    } else if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    }

    let mut points: Vec<Point> = (1..CURVE_STEPS)
        .map(|i| {
            let theta = theta1 + delta * (i as f64 / CURVE_STEPS as f64);
            let (sin_t, cos_t) = theta.sin_cos();
            Point::new(
                cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
                cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
            )
        })
        .collect();
    // Land exactly on the end point
    points.push(to);
    points
}
