//! `preserveAspectRatio`: how a box of one size is laid out inside another.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::transform::AffineTransform;

/// Where the scaled content sits inside the target box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    /// Scale each axis independently to fill the target exactly.
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    #[default]
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

impl Align {
    /// Fraction of the leftover space placed before the content, per axis.
    fn factors(self) -> (f64, f64) {
        match self {
            Align::None | Align::XMinYMin => (0.0, 0.0),
            Align::XMidYMin => (0.5, 0.0),
            Align::XMaxYMin => (1.0, 0.0),
            Align::XMinYMid => (0.0, 0.5),
            Align::XMidYMid => (0.5, 0.5),
            Align::XMaxYMid => (1.0, 0.5),
            Align::XMinYMax => (0.0, 1.0),
            Align::XMidYMax => (0.5, 1.0),
            Align::XMaxYMax => (1.0, 1.0),
        }
    }

    fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            "none" => Align::None,
            "xMinYMin" => Align::XMinYMin,
            "xMidYMin" => Align::XMidYMin,
            "xMaxYMin" => Align::XMaxYMin,
            "xMinYMid" => Align::XMinYMid,
            "xMidYMid" => Align::XMidYMid,
            "xMaxYMid" => Align::XMaxYMid,
            "xMinYMax" => Align::XMinYMax,
            "xMidYMax" => Align::XMidYMax,
            "xMaxYMax" => Align::XMaxYMax,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    /// Whole content visible; uses the smaller axis ratio.
    #[default]
    Meet,
    /// Target fully covered; uses the larger axis ratio.
    Slice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreserveAspectRatio {
    pub align: Align,
    pub scaling: Scaling,
}

impl PreserveAspectRatio {
    /// Uniform fit pinned to the top-left corner.
    pub const FIT: PreserveAspectRatio = PreserveAspectRatio {
        align: Align::XMinYMin,
        scaling: Scaling::Meet,
    };

    /// Parse the attribute value. Unknown keywords fall back to the default
    /// (`xMidYMid meet`); a leading `defer` is ignored.
    pub fn parse(s: &str) -> Self {
        let mut words = s.split_whitespace().peekable();
        if words.peek() == Some(&"defer") {
            words.next();
        }
        let align = words.next().and_then(Align::from_keyword).unwrap_or_default();
        let scaling = match words.next() {
            Some("slice") => Scaling::Slice,
            _ => Scaling::Meet,
        };
        Self { align, scaling }
    }

    /// Transform that lays a box of `size` out inside a box of `into`, both
    /// anchored at the origin.
    ///
    /// A zero-sized axis in `size` can't be scaled; the other axis' ratio is
    /// used for it, and a fully degenerate `size` gives the identity.
    pub fn layout(&self, size: Size, into: Size) -> AffineTransform {
        let ratio = |from: f64, to: f64| (from != 0.0).then(|| to / from);
        let (sx, sy) = match (ratio(size.width, into.width), ratio(size.height, into.height)) {
            (Some(sx), Some(sy)) => (sx, sy),
            (Some(s), None) | (None, Some(s)) => (s, s),
            (None, None) => return AffineTransform::IDENTITY,
        };

        if self.align == Align::None {
            return AffineTransform::scaling(sx, sy);
        }

        let s = match self.scaling {
            Scaling::Meet => sx.min(sy),
            Scaling::Slice => sx.max(sy),
        };
        let (fx, fy) = self.align.factors();
        let dx = (into.width - size.width * s) * fx;
        let dy = (into.height - size.height * s) * fy;
        AffineTransform::scaling(s, s).then(&AffineTransform::translation(dx, dy))
    }
}
