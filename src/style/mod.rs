//! # Style Attribute Parsers
//!
//! Small, independent readers for the presentation attributes that end up on a
//! shape: stroke, fill, opacity, text anchor, id and `url(#id)` references.
//!
//! None of them reports errors. Absent optional attributes take their SVG
//! default, unparsable numbers fall back the same way, and a stroke or fill
//! whose paint can't be resolved is simply left off the shape.

pub mod color;

pub use color::{parse_color, Color, ColorResolver, DefaultColorResolver, Paint};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::number::{parse_number, parse_number_or, AttributeMap};
use crate::path::FillRule;

/// How a shape's outline is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub paint: Paint,
    /// Line width. Defaults to 1.
    pub width: f64,
    /// Defaults to 4.
    pub miter_limit: f64,
    /// Dash pattern. Empty means a solid line.
    pub dashes: Vec<f64>,
    pub dash_offset: f64,
}

/// Horizontal alignment of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Build the stroke for a style dictionary.
///
/// `stroke` must resolve to a paint, otherwise the shape is unstroked and
/// `None` is returned. Every other stroke property is optional.
pub fn parse_stroke(style: &impl AttributeMap, resolver: &impl ColorResolver) -> Option<Stroke> {
    let paint = resolver.resolve(style.attr("stroke")?)?;

    let dashes = style
        .attr("stroke-dasharray")
        .map(parse_dash_array)
        .unwrap_or_default();

    Some(Stroke {
        paint: paint.with_opacity(parse_opacity(style, "stroke-opacity")),
        width: parse_number_or(style, "stroke-width", 1.0),
        miter_limit: parse_number_or(style, "stroke-miterlimit", 4.0),
        dashes,
        dash_offset: parse_number_or(style, "stroke-dashoffset", 0.0),
    })
}

/// Split a dash array on commas. Pieces that aren't numbers become `0` so the
/// pattern keeps its length.
pub fn parse_dash_array(s: &str) -> Vec<f64> {
    s.split(',').map(|p| parse_number(p).unwrap_or(0.0)).collect()
}

/// Fill paint. An absent `fill` means black; `none` or an unresolvable value
/// means no fill.
pub fn parse_fill(style: &impl AttributeMap, resolver: &impl ColorResolver) -> Option<Paint> {
    let paint = match style.attr("fill") {
        Some(value) => resolver.resolve(value)?,
        None => Color::BLACK,
    };
    Some(paint.with_opacity(parse_opacity(style, "fill-opacity")))
}

/// Opacity attribute named `key`, fully opaque when absent or unparsable.
/// Range clamping is left to whoever applies the paint.
pub fn parse_opacity(style: &impl AttributeMap, key: &str) -> f64 {
    parse_number_or(style, key, 1.0)
}

pub fn parse_text_anchor(value: Option<&str>) -> TextAnchor {
    match value {
        Some("middle") => TextAnchor::Center,
        Some("end") => TextAnchor::Trailing,
        _ => TextAnchor::Leading,
    }
}

pub fn parse_fill_rule(value: Option<&str>) -> FillRule {
    match value.map(str::trim) {
        Some("evenodd") => FillRule::EvenOdd,
        _ => FillRule::Winding,
    }
}

/// Element id: `id`, falling back to `xml:id`.
pub fn parse_id(attrs: &impl AttributeMap) -> Option<String> {
    ["id", "xml:id"]
        .into_iter()
        .filter_map(|key| attrs.attr(key))
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Strip the `url(#` ... `)` wrapper from a reference.
///
/// This is a plain string edit: every occurrence of `url(#` and of `)` is
/// removed, whether or not the wrapper was well formed.
pub fn parse_use(reference: Option<&str>) -> Option<String> {
    reference.map(|r| r.replace("url(#", "").replace(')', ""))
}

/// Overlay the declarations of an inline `style` attribute onto the
/// presentation attributes. Declarations win over attributes of the same name.
pub fn merge_style_declarations(attrs: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut merged = attrs.clone();
    if let Some(style) = attrs.get("style") {
        for decl in style.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if !name.is_empty() {
                merged.insert(name.to_string(), value.to_string());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dict(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_stroke_defaults() {
        let stroke = parse_stroke(&dict(&[("stroke", "red")]), &DefaultColorResolver).unwrap();
        assert_eq!(stroke.paint, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.miter_limit, 4.0);
        assert!(stroke.dashes.is_empty());
        assert_eq!(stroke.dash_offset, 0.0);
    }

    #[test]
    fn test_stroke_absent_or_unresolvable() {
        assert!(parse_stroke(&dict(&[("stroke-width", "3")]), &DefaultColorResolver).is_none());
        assert!(parse_stroke(&dict(&[("stroke", "none")]), &DefaultColorResolver).is_none());
        assert!(parse_stroke(&dict(&[("stroke", "#zzz")]), &DefaultColorResolver).is_none());
    }

    #[test]
    fn test_stroke_properties() {
        let style = dict(&[
            ("stroke", "#000"),
            ("stroke-width", "2.5"),
            ("stroke-miterlimit", "10"),
            ("stroke-dasharray", "5, 3"),
            ("stroke-dashoffset", "1"),
            ("stroke-opacity", "0.5"),
        ]);
        let stroke = parse_stroke(&style, &DefaultColorResolver).unwrap();
        assert_eq!(stroke.width, 2.5);
        assert_eq!(stroke.miter_limit, 10.0);
        assert_eq!(stroke.dashes, vec![5.0, 3.0]);
        assert_eq!(stroke.dash_offset, 1.0);
        assert_eq!(stroke.paint.a, 0.5);
    }

    #[test]
    fn test_dash_array_keeps_length() {
        assert_eq!(parse_dash_array("4,,2"), vec![4.0, 0.0, 2.0]);
        assert_eq!(parse_dash_array("1,x,3,"), vec![1.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_fill() {
        assert_eq!(parse_fill(&dict(&[]), &DefaultColorResolver), Some(Color::BLACK));
        assert_eq!(parse_fill(&dict(&[("fill", "none")]), &DefaultColorResolver), None);
        let fill = parse_fill(
            &dict(&[("fill", "white"), ("fill-opacity", "0.25")]),
            &DefaultColorResolver,
        )
        .unwrap();
        assert_eq!(fill.a, 0.25);
    }

    #[test]
    fn test_opacity() {
        assert_eq!(parse_opacity(&dict(&[]), "opacity"), 1.0);
        assert_eq!(parse_opacity(&dict(&[("opacity", "0.3")]), "opacity"), 0.3);
        assert_eq!(parse_opacity(&dict(&[("opacity", "50%")]), "opacity"), 1.0);
        // not clamped
        assert_eq!(parse_opacity(&dict(&[("opacity", "2")]), "opacity"), 2.0);
    }

    #[test]
    fn test_text_anchor() {
        assert_eq!(parse_text_anchor(Some("middle")), TextAnchor::Center);
        assert_eq!(parse_text_anchor(Some("end")), TextAnchor::Trailing);
        assert_eq!(parse_text_anchor(Some("start")), TextAnchor::Leading);
        assert_eq!(parse_text_anchor(Some("bogus")), TextAnchor::Leading);
        assert_eq!(parse_text_anchor(None), TextAnchor::Leading);
    }

    #[test]
    fn test_fill_rule() {
        assert_eq!(parse_fill_rule(Some("evenodd")), FillRule::EvenOdd);
        assert_eq!(parse_fill_rule(Some("nonzero")), FillRule::Winding);
        assert_eq!(parse_fill_rule(None), FillRule::Winding);
    }

    #[test]
    fn test_id() {
        assert_eq!(parse_id(&dict(&[("id", "a"), ("xml:id", "b")])), Some("a".into()));
        assert_eq!(parse_id(&dict(&[("xml:id", "b")])), Some("b".into()));
        assert_eq!(parse_id(&dict(&[("id", ""), ("xml:id", "b")])), Some("b".into()));
        assert_eq!(parse_id(&dict(&[])), None);
    }

    #[test]
    fn test_use_reference() {
        assert_eq!(parse_use(Some("url(#shape1)")), Some("shape1".into()));
        assert_eq!(parse_use(None), None);
        assert_eq!(parse_use(Some("#shape1")), Some("#shape1".into()));
        assert_eq!(parse_use(Some("url(#a")), Some("a".into()));
    }

    #[test]
    fn test_merge_style_declarations() {
        let mut attrs = BTreeMap::new();
        attrs.insert("fill".to_string(), "red".to_string());
        attrs.insert(
            "style".to_string(),
            "fill: blue; stroke-width:3 ;; junk".to_string(),
        );
        let merged = merge_style_declarations(&attrs);
        assert_eq!(merged["fill"], "blue");
        assert_eq!(merged["stroke-width"], "3");
        assert!(!merged.contains_key("junk"));
    }
}
