//! # svgattr
//!
//! Parses SVG attribute *values* into typed primitives: affine transforms,
//! strokes and fills, path segment lists and coordinate-space mappings.
//!
//! Markup tokenization is someone else's job. Callers hand over attribute
//! dictionaries that an XML front end already extracted, and get back values a
//! renderer can use directly. Malformed attribute text never produces an
//! error: each parser degrades to a default or to "absent".
//!
//! ## Architecture
//!
//! ```text
//! Attribute dictionaries (JSON / API)
//!       ↓
//!   [transform]  — transform="..." → AffineTransform
//!   [style]      — stroke, fill, opacity, anchor, id, url(#id)
//!   [path]       — d="..." → PathSegment list + fill rule
//!       ↓
//!   [document]   — one Shape per element
//!       ↓
//!   [shape]      — bounds, respective → absolute coordinate mapping
//! ```

pub mod aspect;
pub mod document;
pub mod error;
pub mod geometry;
pub mod number;
pub mod options;
pub mod path;
pub mod shape;
pub mod style;
pub mod transform;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::SvgAttrError;
pub use transform::{parse_transform, parse_transform_onto, AffineTransform};

use document::AttributeDocument;

/// Resolve an attribute document given as JSON into shapes, returned as
/// pretty-printed JSON.
pub fn resolve_json(json: &str) -> Result<String, SvgAttrError> {
    let doc: AttributeDocument = serde_json::from_str(json)?;
    let shapes = document::resolve(&doc);
    tracing::debug!(
        elements = doc.elements.len(),
        shapes = shapes.len(),
        "resolved attribute document"
    );
    serde_json::to_string_pretty(&shapes).map_err(|e| SvgAttrError::Render(e.to_string()))
}
