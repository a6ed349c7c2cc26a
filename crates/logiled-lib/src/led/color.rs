//! Color types, parsing and formatting for LED control.
//!
//! Colors are carried around as normalized [`LinearColor`] intensities and
//! only turned into the SDK's `0..=100` percentage triples by
//! [`LinearColor::to_percent`], which clamps before scaling.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized RGBA color. Channels are nominally `0.0..=1.0` but may lie
/// outside that range (e.g. when a curve extrapolates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// RGB triple in SDK percentages, each channel `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RgbPercent {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LinearColor {
    pub const BLACK: LinearColor = LinearColor::rgb(0.0, 0.0, 0.0);
    pub const WHITE: LinearColor = LinearColor::rgb(1.0, 1.0, 1.0);

    /// Opaque color from three channel intensities.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        LinearColor { r, g, b, a: 1.0 }
    }

    /// Component-wise linear interpolation; `t = 0` yields `self`.
    pub fn lerp(self, other: LinearColor, t: f32) -> LinearColor {
        LinearColor {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Clamp each channel into `[0, 1]` and scale to SDK percentages.
    pub fn to_percent(self) -> RgbPercent {
        RgbPercent {
            r: channel_percent(self.r),
            g: channel_percent(self.g),
            b: channel_percent(self.b),
        }
    }

    /// Clamp each channel into `[0, 1]` and scale to 8-bit.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
        ]
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        LinearColor::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn channel_percent(v: f32) -> u8 {
    (clamp_unit(v) * 100.0).round() as u8
}

fn channel_byte(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}

impl fmt::Display for LinearColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(R={:.3},G={:.3},B={:.3},A={:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl fmt::Display for RgbPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%,{}%,{}%", self.r, self.g, self.b)
    }
}

impl Serialize for LinearColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_color(*self))
    }
}

impl<'de> Deserialize<'de> for LinearColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a color string into a [`LinearColor`].
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`
pub fn parse_color(s: &str) -> crate::error::Result<LinearColor> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(LinearColor::from_rgb8(0xFF, 0x00, 0x00)),
        "green" => return Ok(LinearColor::from_rgb8(0x00, 0xFF, 0x00)),
        "blue" => return Ok(LinearColor::from_rgb8(0x00, 0x00, 0xFF)),
        "white" => return Ok(LinearColor::WHITE),
        "orange" => return Ok(LinearColor::from_rgb8(0xFF, 0x80, 0x00)),
        "yellow" => return Ok(LinearColor::from_rgb8(0xFF, 0xFF, 0x00)),
        "purple" => return Ok(LinearColor::from_rgb8(0x80, 0x00, 0xFF)),
        "cyan" => return Ok(LinearColor::from_rgb8(0x00, 0xFF, 0xFF)),
        "off" | "black" => return Ok(LinearColor::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::LogiLedError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a color name)"
        )));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LogiLedError::Color(format!("Invalid hex color: {s}")))?;
    Ok(LinearColor::from_rgb8(
        (val >> 16) as u8,
        (val >> 8) as u8,
        val as u8,
    ))
}

/// Format a color as `#RRGGBB` (channels clamped, alpha ignored).
pub fn format_color(color: LinearColor) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── to_percent ──

    #[test]
    fn percent_of_primaries() {
        assert_eq!(
            LinearColor::rgb(1.0, 0.0, 0.0).to_percent(),
            RgbPercent { r: 100, g: 0, b: 0 }
        );
        assert_eq!(
            LinearColor::rgb(0.0, 0.5, 0.25).to_percent(),
            RgbPercent { r: 0, g: 50, b: 25 }
        );
    }

    #[test]
    fn percent_clamps_out_of_range() {
        let p = LinearColor::rgb(-0.5, 1.7, 42.0).to_percent();
        assert_eq!(p, RgbPercent { r: 0, g: 100, b: 100 });
    }

    #[test]
    fn percent_maps_nan_to_zero() {
        let p = LinearColor::rgb(f32::NAN, f32::INFINITY, f32::NEG_INFINITY).to_percent();
        assert_eq!(p, RgbPercent { r: 0, g: 100, b: 0 });
    }

    #[test]
    fn percent_ignores_alpha() {
        let c = LinearColor {
            a: 0.0,
            ..LinearColor::WHITE
        };
        assert_eq!(c.to_percent(), RgbPercent { r: 100, g: 100, b: 100 });
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = LinearColor::BLACK;
        let b = LinearColor::rgb(1.0, 0.5, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), LinearColor::rgb(0.5, 0.25, 0.0));
    }

    // ── parse_color ──

    #[test]
    fn parse_named_colors() {
        assert_eq!(parse_color("red").unwrap(), LinearColor::rgb(1.0, 0.0, 0.0));
        assert_eq!(parse_color("white").unwrap(), LinearColor::WHITE);
        assert_eq!(parse_color("off").unwrap(), LinearColor::BLACK);
        assert_eq!(parse_color("black").unwrap(), LinearColor::BLACK);
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(parse_color("  RED ").unwrap(), parse_color("red").unwrap());
    }

    #[test]
    fn parse_hex_with_and_without_hash() {
        assert_eq!(parse_color("#00FF00").unwrap(), LinearColor::rgb(0.0, 1.0, 0.0));
        assert_eq!(parse_color("0000ff").unwrap(), LinearColor::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn parse_invalid() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("#FF000000").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("#GGHHII").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_basic() {
        assert_eq!(format_color(LinearColor::rgb(1.0, 0.0, 0.0)), "#FF0000");
        assert_eq!(format_color(LinearColor::BLACK), "#000000");
    }

    #[test]
    fn format_clamps() {
        assert_eq!(format_color(LinearColor::rgb(2.0, -1.0, 0.5)), "#FF0080");
    }

    #[test]
    fn parse_format_hex() {
        let c = parse_color("#AB12CD").unwrap();
        assert_eq!(format_color(c), "#AB12CD");
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&LinearColor::rgb(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(json, "\"#FF8000\"");
        let c: LinearColor = serde_json::from_str("\"cyan\"").unwrap();
        assert_eq!(c, LinearColor::rgb(0.0, 1.0, 1.0));
    }

    #[test]
    fn display_formats() {
        assert_eq!(
            LinearColor::rgb(1.0, 0.0, 0.5).to_string(),
            "(R=1.000,G=0.000,B=0.500,A=1.000)"
        );
        assert_eq!(RgbPercent { r: 100, g: 0, b: 50 }.to_string(), "100%,0%,50%");
    }
}
