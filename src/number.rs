//! Numeric coercion for attribute values.
//!
//! Every field that falls back to a default goes through [`parse_number`], so
//! there is exactly one definition of "this text is a number".

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

/// Optional sign, digits with an optional fraction, optional exponent.
pub(crate) const NUMBER_PATTERN: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

pub(crate) fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).unwrap())
}

/// Read-only access to an attribute dictionary.
pub trait AttributeMap {
    fn attr(&self, key: &str) -> Option<&str>;
}

impl AttributeMap for HashMap<String, String> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl AttributeMap for BTreeMap<String, String> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<M: AttributeMap + ?Sized> AttributeMap for &M {
    fn attr(&self, key: &str) -> Option<&str> {
        (**self).attr(key)
    }
}

/// Parse a plain number. Surrounding whitespace is ignored; anything else that
/// isn't a finite float (units, percentages, `inf`, `NaN`) yields `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric attribute with a fallback for absent or unparsable values.
pub fn parse_number_or(attrs: &impl AttributeMap, key: &str, default: f64) -> f64 {
    attrs.attr(key).and_then(parse_number).unwrap_or(default)
}

/// Render a number in its shortest round-trip form (`10`, `0.5`, `-3.25`).
pub(crate) fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        // avoids "-0"
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
