//! # Shapes
//!
//! The resolved value a renderer consumes: geometry plus the transform, paint
//! and stroke parsed from the element's attributes. Also home to the
//! coordinate-space reconciler, which only needs [`Bounded`].

use serde::{Deserialize, Serialize};

use crate::aspect::PreserveAspectRatio;
use crate::geometry::{Point, Rect, Size};
use crate::path::SvgPath;
use crate::style::{Paint, Stroke, TextAnchor};
use crate::transform::AffineTransform;

/// Anything with an extent in its own coordinate frame.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// A parsed SVG element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: ShapeKind,
    #[serde(default)]
    pub transform: AffineTransform,
    #[serde(default)]
    pub fill: Option<Paint>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: None,
            kind,
            transform: AffineTransform::IDENTITY,
            fill: None,
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Bounds after this shape's own transform, i.e. in its parent's frame.
    pub fn transformed_bounds(&self) -> Rect {
        let b = self.bounds();
        if self.transform.is_identity() {
            return b;
        }
        Rect::from_points(
            [
                Point::new(b.min_x(), b.min_y()),
                Point::new(b.max_x(), b.min_y()),
                Point::new(b.max_x(), b.max_y()),
                Point::new(b.min_x(), b.max_y()),
            ]
            .map(|p| self.transform.apply(p)),
        )
    }
}

/// Geometry for each supported element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeKind {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
    Path {
        path: SvgPath,
    },
    Text {
        x: f64,
        y: f64,
        anchor: TextAnchor,
        content: String,
    },
    /// Reference to another element by id.
    Use {
        href: Option<String>,
        x: f64,
        y: f64,
    },
    Group {
        children: Vec<Shape>,
    },
}

impl Bounded for Shape {
    fn bounds(&self) -> Rect {
        match &self.kind {
            ShapeKind::Rect {
                x,
                y,
                width,
                height,
                ..
            } => Rect::new(*x, *y, *width, *height),
            ShapeKind::Circle { cx, cy, r } => Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            ShapeKind::Ellipse { cx, cy, rx, ry } => {
                Rect::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)
            }
            ShapeKind::Line { x1, y1, x2, y2 } => {
                Rect::from_points([Point::new(*x1, *y1), Point::new(*x2, *y2)])
            }
            ShapeKind::Polyline { points } | ShapeKind::Polygon { points } => {
                Rect::from_points(points.iter().copied())
            }
            ShapeKind::Path { path } => path.bounds(),
            // Text metrics live in the renderer; only the anchor point is known.
            ShapeKind::Text { x, y, .. } | ShapeKind::Use { x, y, .. } => {
                Rect::new(*x, *y, 0.0, 0.0)
            }
            ShapeKind::Group { children } => children
                .iter()
                .map(Shape::transformed_bounds)
                .reduce(|acc, r| acc.union(&r))
                .unwrap_or_default(),
        }
    }
}

/// Transform mapping `respective`, whose bounds are expressed as fractions of
/// a unit box, into the absolute frame of `absolute`.
///
/// The target size is `absolute` scaled component-wise by the respective
/// size. The respective box is fitted into it without distortion, then moved
/// to the absolute origin.
pub fn transform_in_respective_coords(
    respective: &impl Bounded,
    absolute: &impl Bounded,
) -> AffineTransform {
    let absolute_bounds = absolute.bounds();
    let respective_bounds = respective.bounds();

    let final_size = Size::new(
        absolute_bounds.width * respective_bounds.width,
        absolute_bounds.height * respective_bounds.height,
    );
    let scale = PreserveAspectRatio::FIT.layout(respective_bounds.size(), final_size);
    let mv = AffineTransform::translation(absolute_bounds.min_x(), absolute_bounds.min_y());
    scale.then(&mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FillRule;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Shape {
        Shape::new(ShapeKind::Rect {
            x,
            y,
            width,
            height,
            rx: 0.0,
            ry: 0.0,
        })
    }

    #[test]
    fn test_reconcile_maps_origin_to_absolute_origin() {
        let t = transform_in_respective_coords(
            &Rect::new(0.0, 0.0, 1.0, 1.0),
            &Rect::new(5.0, 5.0, 100.0, 50.0),
        );
        assert_eq!(t.apply(Point::new(0.0, 0.0)), Point::new(5.0, 5.0));
        // uniform scale by the smaller side
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(55.0, 55.0));
    }

    #[test]
    fn test_reconcile_with_shapes() {
        let respective = Shape::new(ShapeKind::Circle {
            cx: 0.5,
            cy: 0.5,
            r: 0.5,
        });
        let absolute = rect(10.0, 20.0, 40.0, 40.0);
        let t = transform_in_respective_coords(&respective, &absolute);
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_basic_bounds() {
        let circle = Shape::new(ShapeKind::Circle {
            cx: 10.0,
            cy: 10.0,
            r: 5.0,
        });
        assert_eq!(circle.bounds(), Rect::new(5.0, 5.0, 10.0, 10.0));
        let line = Shape::new(ShapeKind::Line {
            x1: 4.0,
            y1: 0.0,
            x2: 0.0,
            y2: 3.0,
        });
        assert_eq!(line.bounds(), Rect::new(0.0, 0.0, 4.0, 3.0));
        let path = Shape::new(ShapeKind::Path {
            path: SvgPath::parse_d("M1 1 L3 4", FillRule::Winding),
        });
        assert_eq!(path.bounds(), Rect::new(1.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_group_bounds_apply_child_transforms() {
        let mut moved = rect(0.0, 0.0, 10.0, 10.0);
        moved.transform = AffineTransform::translation(100.0, 0.0);
        let group = Shape::new(ShapeKind::Group {
            children: vec![rect(0.0, 0.0, 10.0, 10.0), moved],
        });
        assert_eq!(group.bounds(), Rect::new(0.0, 0.0, 110.0, 10.0));
    }

    #[test]
    fn test_empty_group_bounds() {
        let group = Shape::new(ShapeKind::Group { children: vec![] });
        assert_eq!(group.bounds(), Rect::default());
    }

    #[test]
    fn test_shape_json_tagging() {
        let json = serde_json::to_value(rect(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json["kind"]["type"], "Rect");
        assert_eq!(json["opacity"], 1.0);
        assert_eq!(json["transform"]["a"], 1.0);
    }
}
