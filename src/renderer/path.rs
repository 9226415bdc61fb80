//! Path data serialization

use crate::parser::ast::PathData;
use crate::units::format_number;

/// Whether argument `i` of an arc repetition is a length
///
/// Rotation and the two flags (positions 2, 3 and 4) are not.
fn is_arc_length(i: usize) -> bool {
    !matches!(i % 7, 2..=4)
}

/// Convert path data to an SVG `d` attribute string
///
/// Every coordinate and length is multiplied by `scale`; arc rotation and
/// flags are written unchanged.
pub fn to_svg_d(data: &PathData, scale: f64, precision: usize) -> String {
    data.segments
        .iter()
        .map(|segment| {
            let arc = segment.command.eq_ignore_ascii_case(&'a');
            let args: Vec<String> = segment
                .args
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    if arc && !is_arc_length(i) {
                        format_number(*value, precision)
                    } else {
                        format_number(value * scale, precision)
                    }
                })
                .collect();
            if args.is_empty() {
                segment.command.to_string()
            } else {
                format!("{}{}", segment.command, args.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_path_data;

    fn d(input: &str, scale: f64) -> String {
        to_svg_d(&parse_path_data(input).unwrap(), scale, 6)
    }

    #[test]
    fn test_path_to_d() {
        assert_eq!(d("M 0 0 L 100 0 L 100 100 Z", 1.0), "M0 0 L100 0 L100 100 Z");
    }

    #[test]
    fn test_relative_commands_keep_their_letters() {
        assert_eq!(d("m 1 1 l 2,3 h -4 z", 1.0), "m1 1 l2 3 h-4 z");
    }

    #[test]
    fn test_scaled_path() {
        assert_eq!(d("M 96 48 C 0 0 96 0 48 96", 1.0 / 96.0), "M1 0.5 C0 0 1 0 0.5 1");
    }

    #[test]
    fn test_scaled_arc_keeps_rotation_and_flags() {
        assert_eq!(
            d("M 0 0 A 10 20 30 1 0 40 50 a 10 10 45 0 1 20 20", 0.5),
            "M0 0 A5 10 30 1 0 20 25 a5 5 45 0 1 10 10"
        );
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(to_svg_d(&PathData::default(), 1.0, 6), "");
    }
}
