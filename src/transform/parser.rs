//! # Transform Attribute Parser
//!
//! Reads an SVG `transform` attribute such as
//! `"translate(10,20) rotate(45 50 50) scale(2)"` into one [`AffineTransform`].
//!
//! The attribute is scanned left to right. Each `name(args)` chunk is matched,
//! its arguments are pulled out as numeric tokens, and the function is folded
//! into the running total so that later functions act on points first. Nothing
//! here fails: unknown functions and malformed argument lists leave the total
//! untouched and the scan moves on.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use super::AffineTransform;
use crate::number::{number_regex, parse_number};
use crate::options::ParseOptions;

fn function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)").unwrap())
}

/// Pull numeric tokens out of a function's argument text, left to right.
///
/// Separators and trailing junk are skipped; text that holds no number
/// yields an empty list.
pub fn extract_numbers(args: &str) -> Vec<&str> {
    number_regex().find_iter(args).map(|m| m.as_str()).collect()
}

/// The transform functions an SVG attribute can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformFunction {
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
    Matrix,
    /// Anything else. Always a no-op.
    Unknown,
}

impl TransformFunction {
    pub fn from_name(name: &str) -> Self {
        match name {
            "translate" => TransformFunction::Translate,
            "scale" => TransformFunction::Scale,
            "rotate" => TransformFunction::Rotate,
            "skewX" => TransformFunction::SkewX,
            "skewY" => TransformFunction::SkewY,
            "matrix" => TransformFunction::Matrix,
            _ => TransformFunction::Unknown,
        }
    }

    /// Fold this function, called with `tokens`, into `total`.
    ///
    /// Returns `total` unchanged when a required argument is missing or the
    /// argument count doesn't fit the function.
    pub fn apply(self, total: AffineTransform, tokens: &[&str]) -> AffineTransform {
        self.delta(tokens)
            .map(|delta| total.pre_concat(&delta))
            .unwrap_or(total)
    }

    fn delta(self, tokens: &[&str]) -> Option<AffineTransform> {
        let arg = |i: usize| tokens.get(i).and_then(|t| parse_number(t));
        let id = AffineTransform::IDENTITY;

        match self {
            TransformFunction::Translate => {
                let x = arg(0)?;
                Some(id.translated(x, arg(1).unwrap_or(0.0)))
            }
            TransformFunction::Scale => {
                let x = arg(0)?;
                Some(id.scaled(x, arg(1).unwrap_or(x)))
            }
            TransformFunction::Rotate => {
                let angle = arg(0)?.to_radians();
                match tokens.len() {
                    1 => Some(id.rotated(angle)),
                    // Both centre coordinates must parse; the single-argument
                    // form only checks the angle.
                    3 => {
                        let (cx, cy) = (arg(1)?, arg(2)?);
                        Some(id.translated(cx, cy).rotated(angle).translated(-cx, -cy))
                    }
                    _ => None,
                }
            }
            TransformFunction::SkewX => {
                let factor = skew_factor(arg(0)?);
                Some(id.skewed(factor, 0.0))
            }
            TransformFunction::SkewY => {
                let factor = skew_factor(arg(0)?);
                Some(id.skewed(0.0, factor))
            }
            TransformFunction::Matrix => {
                if tokens.len() != 6 {
                    return None;
                }
                Some(AffineTransform::new(
                    arg(0)?,
                    arg(1)?,
                    arg(2)?,
                    arg(3)?,
                    arg(4)?,
                    arg(5)?,
                ))
            }
            TransformFunction::Unknown => None,
        }
    }
}

fn skew_factor(degrees: f64) -> f64 {
    (degrees * std::f64::consts::PI / 180.0).tan()
}

/// Parse a transform attribute starting from the identity.
pub fn parse_transform(attr: &str) -> AffineTransform {
    parse_transform_onto(attr, AffineTransform::IDENTITY)
}

/// Parse a transform attribute, folding each function onto `initial`.
pub fn parse_transform_onto(attr: &str, initial: AffineTransform) -> AffineTransform {
    parse_transform_with(attr, initial, &ParseOptions::default())
}

/// Like [`parse_transform_onto`], honouring the function cap in `options`.
pub fn parse_transform_with(
    attr: &str,
    initial: AffineTransform,
    options: &ParseOptions,
) -> AffineTransform {
    let attr = attr.replace('\n', "");
    let mut folded = 0usize;

    function_regex()
        .captures_iter(&attr)
        .take_while(|_| {
            if folded == options.max_transform_functions {
                warn!(
                    limit = options.max_transform_functions,
                    "transform function limit reached, ignoring the rest"
                );
                return false;
            }
            folded += 1;
            true
        })
        .fold(initial, |total, caps| {
            let name = &caps[1];
            let tokens = extract_numbers(&caps[2]);
            let function = TransformFunction::from_name(name);
            let next = function.apply(total, &tokens);
            if next == total {
                debug!(
                    function = name,
                    args = &caps[2],
                    "transform function left transform unchanged"
                );
            } else {
                trace!(function = name, ?tokens, "folded transform function");
            }
            next
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn assert_close(t: AffineTransform, expected: [f64; 6]) {
        let actual = [t.a, t.b, t.c, t.d, t.tx, t.ty];
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-9, "got {:?}, expected {:?}", actual, expected);
        }
    }

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("10, 20"), vec!["10", "20"]);
        assert_eq!(extract_numbers("-1.5e2 .5 +3"), vec!["-1.5e2", ".5", "+3"]);
        assert_eq!(extract_numbers("1-2"), vec!["1", "-2"]);
        assert_eq!(extract_numbers(""), Vec::<&str>::new());
        assert_eq!(extract_numbers("abc"), Vec::<&str>::new());
    }

    #[test]
    fn test_extract_numbers_trailing_junk() {
        assert_eq!(extract_numbers("4 5 px"), vec!["4", "5"]);
    }

    #[test]
    fn test_function_names() {
        assert_eq!(TransformFunction::from_name("skewX"), TransformFunction::SkewX);
        assert_eq!(TransformFunction::from_name("skewx"), TransformFunction::Unknown);
        assert_eq!(TransformFunction::from_name("perspective"), TransformFunction::Unknown);
    }

    #[test]
    fn test_translate() {
        assert_close(parse_transform("translate(10,20)"), [1.0, 0.0, 0.0, 1.0, 10.0, 20.0]);
        assert_close(parse_transform("translate(7)"), [1.0, 0.0, 0.0, 1.0, 7.0, 0.0]);
    }

    #[test]
    fn test_scale() {
        assert_close(parse_transform("scale(3)"), [3.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
        assert_close(parse_transform("scale(2 4)"), [2.0, 0.0, 0.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rotate_about_origin() {
        let t = parse_transform("rotate(90)");
        assert_close(t, [0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rotate_about_point_fixes_centre() {
        let t = parse_transform("rotate(37, 15, -4)");
        let p = t.apply(Point::new(15.0, -4.0));
        assert!((p.x - 15.0).abs() < 1e-9);
        assert!((p.y + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_wrong_count_is_noop() {
        assert!(parse_transform("rotate(30, 5)").is_identity());
        assert!(parse_transform("rotate(30, 5, 6, 7)").is_identity());
    }

    #[test]
    fn test_skew() {
        assert_close(parse_transform("skewX(45)"), [1.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_close(parse_transform("skewY(45)"), [1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_matrix_matches_translate() {
        assert_eq!(
            parse_transform("matrix(1,0,0,1,5,5)"),
            parse_transform("translate(5,5)")
        );
    }

    #[test]
    fn test_malformed_calls_are_noops() {
        assert!(parse_transform("translate()").is_identity());
        assert!(parse_transform("matrix(1,2,3)").is_identity());
        assert!(parse_transform("scale(abc)").is_identity());
    }

    #[test]
    fn test_chain_scales_before_translating() {
        let t = parse_transform("translate(10,20) scale(2)");
        assert_close(t, [2.0, 0.0, 0.0, 2.0, 10.0, 20.0]);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, 22.0));
    }

    #[test]
    fn test_unknown_function_skipped_mid_chain() {
        let t = parse_transform("translate(1,2) frobnicate(9) translate(3,4)");
        assert_close(t, [1.0, 0.0, 0.0, 1.0, 4.0, 6.0]);
    }

    #[test]
    fn test_no_functions_keeps_initial() {
        let initial = AffineTransform::translation(3.0, 3.0);
        assert_eq!(parse_transform_onto("", initial), initial);
        assert_eq!(parse_transform_onto("garbage", initial), initial);
    }

    #[test]
    fn test_newlines_stripped() {
        let t = parse_transform("translate(1,\n2)\nscale(2)");
        assert_close(t, [2.0, 0.0, 0.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_function_cap() {
        let options = ParseOptions {
            max_transform_functions: 2,
            ..ParseOptions::default()
        };
        let t = parse_transform_with(
            "translate(1) translate(1) translate(1) translate(1)",
            AffineTransform::IDENTITY,
            &options,
        );
        assert_close(t, [1.0, 0.0, 0.0, 1.0, 2.0, 0.0]);
    }
}
