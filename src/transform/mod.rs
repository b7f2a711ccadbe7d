//! # Affine Transforms
//!
//! A 2D affine transform stored as six scalars:
//!
//! ```text
//! x' = a·x + c·y + tx
//! y' = b·x + d·y + ty
//! ```
//!
//! Two composition directions are exposed. [`AffineTransform::then`] applies
//! `self` first and the argument afterwards. The builder-style methods
//! (`translated`, `scaled`, `rotated`, `skewed`) go the other way: the new
//! operation is applied to points *before* the existing transform, which is
//! the order an SVG `transform` attribute is read in.

pub mod parser;

pub use parser::{extract_numbers, parse_transform, parse_transform_onto, TransformFunction};

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `radians`, counter-clockwise in a y-up frame.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Shear with factor `shx` in the x slot and `shy` in the y slot.
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shy, shx, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &AffineTransform) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    /// Apply `inner` first, then `self`.
    pub fn pre_concat(&self, inner: &AffineTransform) -> Self {
        inner.then(self)
    }

    pub fn translated(&self, tx: f64, ty: f64) -> Self {
        self.pre_concat(&Self::translation(tx, ty))
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        self.pre_concat(&Self::scaling(sx, sy))
    }

    pub fn rotated(&self, radians: f64) -> Self {
        self.pre_concat(&Self::rotation(radians))
    }

    pub fn skewed(&self, shx: f64, shy: f64) -> Self {
        self.pre_concat(&Self::shear(shx, shy))
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
