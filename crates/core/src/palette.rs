//! Ordered color palettes for dot layers.
//!
//! Unlike a gradient palette, a layer palette is sampled discretely: each
//! dot picks one swatch at random and keeps its index, which later gives a
//! deterministic back-to-front draw order within the layer. A small
//! lightness jitter in OKLCh keeps same-swatch dots from looking cloned.

use crate::color::{oklch_to_srgb, srgb_to_oklch, Srgb};
use crate::error::CoreError;
use crate::prng::Xorshift64;

/// A non-empty, ordered list of color swatches.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from a list of colors. Requires at least one.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, CoreError> {
        if colors.is_empty() {
            return Err(CoreError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, CoreError> {
        let colors: Result<Vec<Srgb>, CoreError> =
            hexes.iter().map(|h| Srgb::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Number of swatches.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The swatch at `index`, wrapping out-of-range indices.
    pub fn swatch(&self, index: usize) -> Srgb {
        self.colors[index % self.colors.len()]
    }

    /// All swatches in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks a uniformly random swatch, returning its index and color.
    pub fn pick(&self, rng: &mut Xorshift64) -> (usize, Srgb) {
        let idx = rng.next_usize(self.colors.len());
        (idx, self.colors[idx])
    }

    // -- Built-in palettes --

    /// Deep blues to cyan.
    pub fn ocean() -> Self {
        Self::from_hex(&["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"])
            .expect("ocean palette hex values are valid")
    }

    /// Vibrant pinks, greens, yellows.
    pub fn neon() -> Self {
        Self::from_hex(&["#ff00ff", "#00ff41", "#ffff00", "#ff0080", "#00ffff"])
            .expect("neon palette hex values are valid")
    }

    /// Warm reds and oranges.
    pub fn ember() -> Self {
        Self::from_hex(&["#641220", "#a11d33", "#e01e37", "#f26a4f", "#ffcb69"])
            .expect("ember palette hex values are valid")
    }

    /// Black to white ramp.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#000000", "#404040", "#808080", "#c0c0c0", "#ffffff"])
            .expect("monochrome palette hex values are valid")
    }

    /// Constructs a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "ocean" => Ok(Self::ocean()),
            "neon" => Ok(Self::neon()),
            "ember" => Ok(Self::ember()),
            "monochrome" => Ok(Self::monochrome()),
            _ => Err(CoreError::InvalidPalette(format!(
                "unknown palette: {name}"
            ))),
        }
    }

    /// Names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        &["ocean", "neon", "ember", "monochrome"]
    }
}

/// Perturbs a color's OKLCh lightness by a uniform offset in
/// [-amount, amount), clamped to [0, 1].
pub fn jitter_lightness(color: Srgb, amount: f64, rng: &mut Xorshift64) -> Srgb {
    let mut lch = srgb_to_oklch(color);
    lch.l = (lch.l + rng.next_range(-amount, amount)).clamp(0.0, 1.0);
    oklch_to_srgb(lch)
}
