//! Color types for dot tinting.
//!
//! Dots carry an [`Srgb`] display color. Per-dot lightness jitter happens
//! in OKLCh so equally-spaced perturbations look equally strong to the
//! eye; only the two endpoints of that round trip are public.

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` so configs stay human-editable.
/// The hex round trip has 8-bit quantization, which is acceptable for
/// display colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLCh: cylindrical form of the OKLab perceptual space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `CoreError::InvalidColor` for anything but 6 hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, CoreError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(CoreError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| CoreError::InvalidColor(format!("invalid hex component: {e}")))
        };
        Ok(Srgb {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
        })
    }

    /// Formats the color as `"#rrggbb"` with 8-bit rounding.
    pub fn to_hex(self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn gamma_decode(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn gamma_encode(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to OKLCh (via linear RGB and OKLab).
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    let r = gamma_decode(c.r);
    let g = gamma_decode(c.g);
    let b = gamma_decode(c.b);

    let l_ = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m_ = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s_ = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

    let l = 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_;
    let a = 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_;
    let bb = 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_;

    let c_ = (a * a + bb * bb).sqrt();
    let h = bb.atan2(a).to_degrees().rem_euclid(360.0);
    OkLch { l, c: c_, h }
}

/// Converts OKLCh back to sRGB, clamping components to [0, 1].
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    let h = c.h.to_radians();
    let a = c.c * h.cos();
    let b = c.c * h.sin();

    let l_ = c.l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = c.l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = c.l - 0.0894841775 * a - 1.2914855480 * b;

    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;

    let r = 4.0767416621 * l3 - 3.3077115913 * m3 + 0.2309699292 * s3;
    let g = -1.2684380046 * l3 + 2.6097574011 * m3 - 0.3413193965 * s3;
    let bb = -0.0041960863 * l3 - 0.7034186147 * m3 + 1.7076147010 * s3;

    Srgb {
        r: gamma_encode(r).clamp(0.0, 1.0),
        g: gamma_encode(g).clamp(0.0, 1.0),
        b: gamma_encode(bb).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#ff8000").unwrap();
        let b = Srgb::from_hex("FF8000").unwrap();
        assert_eq!(a, b);
        assert!((a.r - 1.0).abs() < 1e-9);
        assert!((a.g - 128.0 / 255.0).abs() < 1e-9);
        assert!(a.b.abs() < 1e-9);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#aabbccdd").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#123456", "#c0ffee"] {
            let c = Srgb::from_hex(hex).unwrap();
            assert_eq!(c.to_hex(), hex);
        }
    }

    #[test]
    fn serde_round_trip_as_hex_string() {
        let c = Srgb::from_hex("#336699").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#336699\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn oklch_round_trip_close_to_original() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#808080", "#ffcc00"] {
            let orig = Srgb::from_hex(hex).unwrap();
            let back = oklch_to_srgb(srgb_to_oklch(orig));
            assert!(
                (orig.r - back.r).abs() < 1e-6
                    && (orig.g - back.g).abs() < 1e-6
                    && (orig.b - back.b).abs() < 1e-6,
                "round trip drifted for {hex}: {back:?}"
            );
        }
    }

    #[test]
    fn white_has_high_lightness_black_has_low() {
        let white = srgb_to_oklch(Srgb::from_hex("#ffffff").unwrap());
        let black = srgb_to_oklch(Srgb::from_hex("#000000").unwrap());
        assert!(white.l > 0.99, "white lightness {}", white.l);
        assert!(black.l < 0.01, "black lightness {}", black.l);
    }

    #[test]
    fn lightness_shift_brightens() {
        let base = srgb_to_oklch(Srgb::from_hex("#446688").unwrap());
        let brighter = oklch_to_srgb(OkLch {
            l: (base.l + 0.2).min(1.0),
            ..base
        });
        let orig = oklch_to_srgb(base);
        assert!(
            brighter.r + brighter.g + brighter.b > orig.r + orig.g + orig.b,
            "lightness bump did not brighten"
        );
    }
}
