//! # Attribute Documents
//!
//! The JSON input format: a tree of elements, each carrying the attribute
//! dictionary an XML front end extracted for it. Resolving a document runs
//! every attribute parser over each element and yields [`Shape`] values.
//!
//! ```json
//! {
//!   "options": { "maxTransformFunctions": 64 },
//!   "elements": [
//!     { "tag": "rect", "attributes": { "width": "10", "height": "5", "stroke": "red" } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Point;
use crate::number::{number_regex, parse_number, parse_number_or};
use crate::options::ParseOptions;
use crate::path::SvgPath;
use crate::shape::{Shape, ShapeKind};
use crate::style::{self, ColorResolver, DefaultColorResolver};
use crate::transform::parser::parse_transform_with;
use crate::transform::AffineTransform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDocument {
    pub elements: Vec<ElementAttributes>,
    #[serde(default)]
    pub options: ParseOptions,
}

/// One element: its tag, its raw attributes and its children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAttributes {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ElementAttributes>,
    /// Character data, for `text` elements.
    #[serde(default)]
    pub text: Option<String>,
}

/// Turns elements into shapes using a color resolver and parser limits.
pub struct Resolver<C: ColorResolver = DefaultColorResolver> {
    colors: C,
    options: ParseOptions,
}

impl Resolver<DefaultColorResolver> {
    pub fn new(options: ParseOptions) -> Self {
        Self::with_colors(DefaultColorResolver, options)
    }
}

impl<C: ColorResolver> Resolver<C> {
    pub fn with_colors(colors: C, options: ParseOptions) -> Self {
        Self { colors, options }
    }

    pub fn resolve_all(&self, elements: &[ElementAttributes]) -> Vec<Shape> {
        elements.iter().filter_map(|e| self.resolve(e)).collect()
    }

    /// Resolve one element. Tags without geometry are skipped.
    pub fn resolve(&self, element: &ElementAttributes) -> Option<Shape> {
        let attrs = style::merge_style_declarations(&element.attributes);
        let num = |key: &str| parse_number_or(&attrs, key, 0.0);

        let kind = match element.tag.as_str() {
            "rect" => {
                // a missing corner radius takes the other one
                let rx = attrs.get("rx").map(|_| num("rx"));
                let ry = attrs.get("ry").map(|_| num("ry"));
                ShapeKind::Rect {
                    x: num("x"),
                    y: num("y"),
                    width: num("width"),
                    height: num("height"),
                    rx: rx.or(ry).unwrap_or(0.0),
                    ry: ry.or(rx).unwrap_or(0.0),
                }
            }
            "circle" => ShapeKind::Circle {
                cx: num("cx"),
                cy: num("cy"),
                r: num("r"),
            },
            "ellipse" => ShapeKind::Ellipse {
                cx: num("cx"),
                cy: num("cy"),
                rx: num("rx"),
                ry: num("ry"),
            },
            "line" => ShapeKind::Line {
                x1: num("x1"),
                y1: num("y1"),
                x2: num("x2"),
                y2: num("y2"),
            },
            "polyline" => ShapeKind::Polyline {
                points: parse_points(attrs.get("points").map_or("", String::as_str)),
            },
            "polygon" => ShapeKind::Polygon {
                points: parse_points(attrs.get("points").map_or("", String::as_str)),
            },
            "path" => ShapeKind::Path {
                path: SvgPath::parse_d_with(
                    attrs.get("d").map_or("", String::as_str),
                    style::parse_fill_rule(attrs.get("fill-rule").map(String::as_str)),
                    &self.options,
                ),
            },
            "text" => ShapeKind::Text {
                x: num("x"),
                y: num("y"),
                anchor: style::parse_text_anchor(attrs.get("text-anchor").map(String::as_str)),
                content: element.text.clone().unwrap_or_default(),
            },
            "use" => {
                let href = attrs
                    .get("href")
                    .or_else(|| attrs.get("xlink:href"))
                    .map(String::as_str);
                ShapeKind::Use {
                    href: style::parse_use(href).map(|h| h.trim_start_matches('#').to_string()),
                    x: num("x"),
                    y: num("y"),
                }
            }
            "g" | "svg" => ShapeKind::Group {
                children: self.resolve_all(&element.children),
            },
            other => {
                debug!(tag = other, "skipping element without geometry");
                return None;
            }
        };

        let transform = attrs
            .get("transform")
            .map(|t| parse_transform_with(t, AffineTransform::IDENTITY, &self.options))
            .unwrap_or_default();

        let fill = match kind {
            // lines have no interior
            ShapeKind::Line { .. } => None,
            _ => style::parse_fill(&attrs, &self.colors),
        };

        Some(Shape {
            id: style::parse_id(&attrs),
            fill,
            stroke: style::parse_stroke(&attrs, &self.colors),
            opacity: style::parse_opacity(&attrs, "opacity"),
            transform,
            kind,
        })
    }
}

/// Resolve every top-level element with the default color resolver.
pub fn resolve(document: &AttributeDocument) -> Vec<Shape> {
    Resolver::new(document.options).resolve_all(&document.elements)
}

/// Parse a `points` attribute ("10,20 30,40"). A trailing odd coordinate is dropped.
pub fn parse_points(s: &str) -> Vec<Point> {
    let nums: Vec<f64> = number_regex()
        .find_iter(s)
        .filter_map(|m| parse_number(m.as_str()))
        .collect();

    nums.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}
