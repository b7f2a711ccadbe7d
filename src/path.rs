//! # Path Segments
//!
//! A path is kept as the raw command list of its `d` attribute: each segment
//! is a command letter (case-sensitive, so absolute and relative forms stay
//! distinct) plus the numbers that followed it. Nothing is normalized here;
//! curve flattening and relative-to-absolute conversion belong to whoever
//! draws the path.
//!
//! The compact text form is `M0,0 L10,10 Z`: segments separated by a space,
//! numbers joined with commas, no separator after the command letter.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::number::{format_number, parse_number, NUMBER_PATTERN};
use crate::options::ParseOptions;
use crate::shape::Bounded;

/// Rule for deciding which regions a path encloses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillRule {
    /// Nonzero winding.
    #[default]
    Winding,
    EvenOdd,
}

/// One drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    #[serde(rename = "type")]
    pub kind: char,
    pub data: Vec<f64>,
}

impl PathSegment {
    pub fn new(kind: char, data: Vec<f64>) -> Self {
        Self { kind, data }
    }

    fn to_compact(&self) -> String {
        let numbers: Vec<String> = self.data.iter().map(|v| format_number(*v)).collect();
        format!("{}{}", self.kind, numbers.join(","))
    }
}

/// An ordered list of segments plus its fill rule.
///
/// Serializes as `{ "path": "M0,0 L10,10", "fillRule": "winding" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "SerializedPath", from = "SerializedPath")]
pub struct SvgPath {
    pub segments: Vec<PathSegment>,
    pub fill_rule: FillRule,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedPath {
    path: String,
    #[serde(default)]
    fill_rule: FillRule,
}

impl From<SvgPath> for SerializedPath {
    fn from(p: SvgPath) -> Self {
        SerializedPath {
            path: p.to_path_string(),
            fill_rule: p.fill_rule,
        }
    }
}

impl From<SerializedPath> for SvgPath {
    fn from(p: SerializedPath) -> Self {
        SvgPath::parse_d(&p.path, p.fill_rule)
    }
}

const COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("[{}]|{}", COMMANDS, NUMBER_PATTERN)).unwrap())
}

impl SvgPath {
    pub fn new(segments: Vec<PathSegment>, fill_rule: FillRule) -> Self {
        Self {
            segments,
            fill_rule,
        }
    }

    /// Render the compact text form.
    pub fn to_path_string(&self) -> String {
        self.segments
            .iter()
            .map(PathSegment::to_compact)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split a `d` attribute into raw segments.
    pub fn parse_d(d: &str, fill_rule: FillRule) -> Self {
        Self::parse_d_with(d, fill_rule, &ParseOptions::default())
    }

    /// Like [`SvgPath::parse_d`], keeping at most `options.max_path_segments`.
    ///
    /// Numbers before the first command letter are dropped. Implicit
    /// repetitions (`L 1 2 3 4`) stay in one segment's data.
    pub fn parse_d_with(d: &str, fill_rule: FillRule, options: &ParseOptions) -> Self {
        let mut segments: Vec<PathSegment> = Vec::new();

        for token in token_regex().find_iter(d) {
            let text = token.as_str();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if COMMANDS.contains(c) => {
                    if segments.len() == options.max_path_segments {
                        tracing::warn!(
                            limit = options.max_path_segments,
                            "path segment limit reached, truncating"
                        );
                        break;
                    }
                    segments.push(PathSegment::new(c, Vec::new()));
                }
                _ => {
                    if let (Some(seg), Some(v)) = (segments.last_mut(), parse_number(text)) {
                        seg.data.push(v);
                    }
                }
            }
        }

        Self::new(segments, fill_rule)
    }

    /// Every point the path passes through or uses as a control point, in
    /// absolute coordinates.
    fn control_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        let mut cur = Point::default();
        let mut start = Point::default();

        for seg in &self.segments {
            let rel = seg.kind.is_ascii_lowercase();
            let base = |cur: Point| if rel { cur } else { Point::default() };
            let d = &seg.data;

            match seg.kind.to_ascii_uppercase() {
                'M' | 'L' | 'T' => {
                    for (i, pair) in d.chunks_exact(2).enumerate() {
                        let b = base(cur);
                        cur = Point::new(b.x + pair[0], b.y + pair[1]);
                        if i == 0 && seg.kind.eq_ignore_ascii_case(&'M') {
                            start = cur;
                        }
                        points.push(cur);
                    }
                }
                'H' => {
                    for x in d {
                        cur.x = if rel { cur.x + x } else { *x };
                        points.push(cur);
                    }
                }
                'V' => {
                    for y in d {
                        cur.y = if rel { cur.y + y } else { *y };
                        points.push(cur);
                    }
                }
                'C' | 'S' | 'Q' => {
                    let n = if seg.kind.eq_ignore_ascii_case(&'C') { 6 } else { 4 };
                    for group in d.chunks_exact(n) {
                        let b = base(cur);
                        for pair in group.chunks_exact(2) {
                            points.push(Point::new(b.x + pair[0], b.y + pair[1]));
                        }
                        cur = Point::new(b.x + group[n - 2], b.y + group[n - 1]);
                    }
                }
                'A' => {
                    for group in d.chunks_exact(7) {
                        let b = base(cur);
                        cur = Point::new(b.x + group[5], b.y + group[6]);
                        points.push(cur);
                    }
                }
                'Z' => cur = start,
                _ => {}
            }
        }

        points
    }
}

impl Bounded for SvgPath {
    /// Bounds of the control polygon. Curves never leave it, so this is a
    /// conservative box; arcs contribute only their end points.
    fn bounds(&self) -> Rect {
        Rect::from_points(self.control_points())
    }
}
