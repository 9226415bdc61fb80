//! Interpretation of path data into absolute drawing commands

use crate::error::GeometryError;
use crate::parser::ast::{PathData, Segment};

use super::Point;

/// An absolute drawing command
///
/// Shorthand forms are normalized away: `H`/`V` become [`Command::LineTo`],
/// `S`/`T` become curves with their reflected control point spelled out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a new sub-path
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        end: Point,
    },
    QuadTo {
        ctrl: Point,
        end: Point,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current sub-path back to its start
    Close,
}

impl Command {
    /// Point the command leaves the pen at, if it names one
    pub fn end(&self) -> Option<Point> {
        match self {
            Command::MoveTo(p) | Command::LineTo(p) => Some(*p),
            Command::CubicTo { end, .. }
            | Command::QuadTo { end, .. }
            | Command::ArcTo { end, .. } => Some(*end),
            Command::Close => None,
        }
    }
}

/// Number of arguments one repetition of a command consumes
fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

fn flag(value: f64, path: usize, segment: &Segment) -> Result<bool, GeometryError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(GeometryError::InvalidArcFlag {
            path,
            span: segment.span.clone(),
        })
    }
}

/// Resolve relative coordinates and shorthands into absolute commands
///
/// `path` is the document-order index reported in errors.
pub fn interpret(path: usize, data: &PathData) -> Result<Vec<Command>, GeometryError> {
    let mut commands = Vec::new();
    let mut current = Point::origin();
    let mut subpath_start = current;
    let mut closed = false;
    // Second control point of the previous C/S, control point of the previous Q/T
    let mut last_cubic: Option<Point> = None;
    let mut last_quad: Option<Point> = None;

    for (i, segment) in data.segments.iter().enumerate() {
        let upper = segment.command.to_ascii_uppercase();
        let Some(arity) = arity(segment.command) else {
            return Err(GeometryError::UnsupportedCommand {
                path,
                command: segment.command,
                span: segment.span.clone(),
            });
        };
        if i == 0 && upper != 'M' {
            return Err(GeometryError::MissingMoveTo {
                path,
                command: segment.command,
                span: segment.span.clone(),
            });
        }

        let found = segment.args.len();
        let valid_count = if arity == 0 {
            found == 0
        } else {
            found > 0 && found % arity == 0
        };
        if !valid_count {
            return Err(GeometryError::ArgumentCount {
                path,
                command: segment.command,
                arity,
                found,
                span: segment.span.clone(),
            });
        }

        if upper == 'Z' {
            commands.push(Command::Close);
            current = subpath_start;
            closed = true;
            last_cubic = None;
            last_quad = None;
            continue;
        }

        // Drawing straight after a close starts a new sub-path at the close point
        if closed && upper != 'M' {
            commands.push(Command::MoveTo(current));
        }
        closed = false;

        let relative = segment.is_relative();
        for (n, args) in segment.args.chunks(arity).enumerate() {
            let base = if relative { current } else { Point::origin() };
            let at = |x: f64, y: f64| base.offset(x, y);

            let command = match upper {
                'M' => {
                    let p = at(args[0], args[1]);
                    if n == 0 {
                        subpath_start = p;
                        Command::MoveTo(p)
                    } else {
                        // Extra coordinate pairs after a moveto are implicit linetos
                        Command::LineTo(p)
                    }
                }
                'L' => Command::LineTo(at(args[0], args[1])),
                'H' => {
                    let x = if relative { current.x + args[0] } else { args[0] };
                    Command::LineTo(Point::new(x, current.y))
                }
                'V' => {
                    let y = if relative { current.y + args[0] } else { args[0] };
                    Command::LineTo(Point::new(current.x, y))
                }
                'C' => Command::CubicTo {
                    ctrl1: at(args[0], args[1]),
                    ctrl2: at(args[2], args[3]),
                    end: at(args[4], args[5]),
                },
                'S' => Command::CubicTo {
                    ctrl1: last_cubic.map_or(current, |c| current.reflect(c)),
                    ctrl2: at(args[0], args[1]),
                    end: at(args[2], args[3]),
                },
                'Q' => Command::QuadTo {
                    ctrl: at(args[0], args[1]),
                    end: at(args[2], args[3]),
                },
                'T' => Command::QuadTo {
                    ctrl: last_quad.map_or(current, |c| current.reflect(c)),
                    end: at(args[0], args[1]),
                },
                'A' => Command::ArcTo {
                    rx: args[0].abs(),
                    ry: args[1].abs(),
                    rotation: args[2],
                    large_arc: flag(args[3], path, segment)?,
                    sweep: flag(args[4], path, segment)?,
                    end: at(args[5], args[6]),
                },
                _ => {
                    return Err(GeometryError::UnsupportedCommand {
                        path,
                        command: segment.command,
                        span: segment.span.clone(),
                    })
                }
            };

            (last_cubic, last_quad) = match command {
                Command::CubicTo { ctrl2, .. } => (Some(ctrl2), None),
                Command::QuadTo { ctrl, .. } => (None, Some(ctrl)),
                _ => (None, None),
            };
            if let Some(end) = command.end() {
                current = end;
            }
            commands.push(command);
        }
    }

    Ok(commands)
}
