//! Reversal of interpreted command sequences

use crate::parser::ast::{PathData, Segment};

use super::{Command, Point};

/// One drawing command together with the point it starts from
type Piece = (Point, Command);

struct SubPath {
    start: Point,
    pieces: Vec<Piece>,
    closed: bool,
}

impl SubPath {
    fn end(&self) -> Point {
        self.pieces
            .last()
            .and_then(|(_, command)| command.end())
            .unwrap_or(self.start)
    }
}

fn split_subpaths(commands: &[Command]) -> Vec<SubPath> {
    let mut subpaths: Vec<SubPath> = Vec::new();
    let mut current = Point::origin();

    for command in commands {
        match *command {
            Command::MoveTo(p) => {
                subpaths.push(SubPath {
                    start: p,
                    pieces: Vec::new(),
                    closed: false,
                });
                current = p;
            }
            Command::Close => {
                if let Some(subpath) = subpaths.last_mut() {
                    subpath.closed = true;
                    current = subpath.start;
                }
            }
            drawing => {
                if let Some(subpath) = subpaths.last_mut() {
                    subpath.pieces.push((current, drawing));
                }
                if let Some(end) = drawing.end() {
                    current = end;
                }
            }
        }
    }
    subpaths
}

fn segment(command: char, args: Vec<f64>) -> Segment {
    Segment::new(command, args, 0..0)
}

/// The same piece drawn from its end back to `from`
fn reverse_piece((from, command): Piece) -> Option<Segment> {
    match command {
        Command::LineTo(_) => Some(segment('L', vec![from.x, from.y])),
        Command::CubicTo { ctrl1, ctrl2, .. } => Some(segment(
            'C',
            vec![ctrl2.x, ctrl2.y, ctrl1.x, ctrl1.y, from.x, from.y],
        )),
        Command::QuadTo { ctrl, .. } => Some(segment('Q', vec![ctrl.x, ctrl.y, from.x, from.y])),
        Command::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            ..
        } => Some(segment(
            'A',
            vec![
                rx,
                ry,
                rotation,
                f64::from(u8::from(large_arc)),
                f64::from(u8::from(!sweep)),
                from.x,
                from.y,
            ],
        )),
        Command::MoveTo(_) | Command::Close => None,
    }
}

/// Build absolute path data drawing the same shape in the opposite direction
///
/// Sub-paths come out in reverse order, each starting where it used to end.
/// A closed sub-path keeps its start vertex: it moves there, draws the
/// closing edge backwards, walks the remaining pieces back and closes again.
pub fn reverse(commands: &[Command]) -> PathData {
    let mut segments = Vec::new();

    for subpath in split_subpaths(commands).into_iter().rev() {
        let end = subpath.end();
        if subpath.closed {
            segments.push(segment('M', vec![subpath.start.x, subpath.start.y]));
            if end != subpath.start {
                segments.push(segment('L', vec![end.x, end.y]));
            }
        } else {
            segments.push(segment('M', vec![end.x, end.y]));
        }

        segments.extend(subpath.pieces.into_iter().rev().filter_map(reverse_piece));

        if subpath.closed {
            segments.push(segment('Z', vec![]));
        }
    }

    PathData::new(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{features, interpret};
    use crate::parser::parse_path_data;

    fn commands(d: &str) -> Vec<Command> {
        interpret(0, &parse_path_data(d).expect("Should parse")).expect("Should interpret")
    }

    fn summary(data: &PathData) -> Vec<(char, Vec<f64>)> {
        data.segments
            .iter()
            .map(|s| (s.command, s.args.clone()))
            .collect()
    }

    #[test]
    fn test_reverse_line() {
        let reversed = reverse(&commands("M100 0 L90 0"));
        assert_eq!(
            summary(&reversed),
            vec![('M', vec![90.0, 0.0]), ('L', vec![100.0, 0.0])]
        );
    }

    #[test]
    fn test_reverse_relative_polyline() {
        let reversed = reverse(&commands("m 0 0 l 10 0 l 0 10"));
        assert_eq!(
            summary(&reversed),
            vec![
                ('M', vec![10.0, 10.0]),
                ('L', vec![10.0, 0.0]),
                ('L', vec![0.0, 0.0]),
            ]
        );
    }

    #[test]
    fn test_reverse_cubic_swaps_controls() {
        let reversed = reverse(&commands("M 0 0 C 1 2 3 4 5 6"));
        assert_eq!(
            summary(&reversed),
            vec![
                ('M', vec![5.0, 6.0]),
                ('C', vec![3.0, 4.0, 1.0, 2.0, 0.0, 0.0]),
            ]
        );
    }

    #[test]
    fn test_reverse_arc_flips_sweep() {
        let reversed = reverse(&commands("M 0 0 A 5 5 0 1 1 10 0"));
        assert_eq!(
            summary(&reversed)[1],
            ('A', vec![5.0, 5.0, 0.0, 1.0, 0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn test_reverse_closed_subpath() {
        let reversed = reverse(&commands("M 0 0 L 10 0 L 10 10 Z"));
        assert_eq!(
            summary(&reversed),
            vec![
                ('M', vec![0.0, 0.0]),
                ('L', vec![10.0, 10.0]),
                ('L', vec![10.0, 0.0]),
                ('L', vec![0.0, 0.0]),
                ('Z', vec![]),
            ]
        );
    }

    #[test]
    fn test_reverse_multiple_subpaths_swaps_order() {
        let reversed = reverse(&commands("M 0 0 L 1 0 M 5 5 L 6 5"));
        assert_eq!(
            summary(&reversed),
            vec![
                ('M', vec![6.0, 5.0]),
                ('L', vec![5.0, 5.0]),
                ('M', vec![1.0, 0.0]),
                ('L', vec![0.0, 0.0]),
            ]
        );
    }

    #[test]
    fn test_reverse_swaps_start_and_end() {
        let original = commands("M 3 4 q 5 5 10 0 t 10 0 s 5 5 10 0 h 4");
        let before = features(&original).unwrap();
        let reversed = interpret(0, &reverse(&original)).unwrap();
        let after = features(&reversed).unwrap();
        assert_eq!(after.start, before.end);
        assert_eq!(after.end, before.start);
        assert!(after.centroid.distance(before.centroid) < 1e-9);
    }

    #[test]
    fn test_reverse_twice_restores_endpoints() {
        let original = commands("M 0 0 L 10 0 L 10 10 Z M 20 20 L 30 20");
        let twice = interpret(0, &reverse(&interpret(0, &reverse(&original)).unwrap())).unwrap();
        assert_eq!(features(&twice).unwrap().start, Point::new(0.0, 0.0));
        assert_eq!(features(&twice).unwrap().end, Point::new(30.0, 20.0));
    }
}
