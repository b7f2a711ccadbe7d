//! Color values and the resolver seam used by the paint parsers.

use serde::{Deserialize, Serialize};

/// An RGBA color, each channel 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Paint is a flat color; gradients and patterns belong to the renderer.
pub type Paint = Color;

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply alpha by `opacity`. No clamping happens here.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Turns a paint attribute value into a color.
pub trait ColorResolver {
    /// `None` means "no paint": the value was `none`, unknown or malformed.
    fn resolve(&self, value: &str) -> Option<Paint>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<Paint>,
{
    fn resolve(&self, value: &str) -> Option<Paint> {
        self(value)
    }
}

/// Hex, `rgb()`/`rgba()` and a table of common named colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColorResolver;

impl ColorResolver for DefaultColorResolver {
    fn resolve(&self, value: &str) -> Option<Paint> {
        parse_color(value)
    }
}

/// Parse a CSS/SVG color string.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(inner) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 4 {
            return None;
        }
        let [r, g, b] = parse_channels(&parts[..3])?;
        let a = parts[3].trim().parse::<f64>().ok()?;
        return Some(Color::rgba(r, g, b, a));
    }
    if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 3 {
            return None;
        }
        let [r, g, b] = parse_channels(&parts)?;
        return Some(Color::rgb(r, g, b));
    }
    named_color(&s.to_ascii_lowercase())
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
    match hex.len() {
        3 => Some(Color::rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Color::rgba(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// `rgb()` channels: 0-255 integers or percentages.
fn parse_channels(parts: &[&str]) -> Option<[f64; 3]> {
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        let part = part.trim();
        *slot = match part.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
            None => part.parse::<f64>().ok()? / 255.0,
        };
    }
    Some(out)
}

fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "navy" => (0, 0, 128),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "teal" => (0, 128, 128),
        "transparent" => return Some(Color::rgba(0.0, 0.0, 0.0, 0.0)),
        _ => return None,
    };
    Some(Color::rgb(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
    ))
}
