//! Configuration schema for a dot-field animation.
//!
//! The configuration is owned by the caller (UI, CLI, exporter) and passed
//! explicitly into every core entry point; the core never holds a
//! reference to it between ticks. Every field has a serde default, so a
//! partial JSON document deserializes into a runnable configuration and a
//! value missing at any level degrades rather than fails.
//!
//! Per-field parameter sub-records (`fields`) stay schemaless JSON, read
//! through the helpers in [`crate::params`] by whichever field consumes
//! them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Srgb;

/// Dot population mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Uniform lattice of identical dots.
    Grid,
    /// Randomly placed dots grouped into parallax depth layers.
    #[default]
    Layered,
}

/// How a dot is painted by the snapshot consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStyle {
    #[default]
    Solid,
    Gradient,
}

/// Boundary behavior for dots of a layer.
///
/// This is an explicit per-layer attribute rather than a rule inferred
/// from layer position; configs that want a periodic foreground layer set
/// `boundary: "wrap"` on it. Grid-mode dots always wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Periodic: the dot re-enters through the opposite edge.
    Wrap,
    /// Soft containment: velocity reflected and damped, position clamped.
    #[default]
    Bounce,
}

/// Settings for grid (uniform lattice) mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Lattice spacing in pixels.
    pub spacing: f64,
    /// Dot radius in pixels.
    pub radius: f64,
    /// Dot color.
    pub color: Srgb,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 25.0,
            radius: 2.0,
            color: Srgb {
                r: 1.0,
                g: 1.0,
                b: 1.0,
            },
        }
    }
}

/// Settings for one depth layer (layered mode).
///
/// Layer order is positional: index 0 is the back layer, placed and drawn
/// first. `radius_ratio` is a fraction of canvas height so configs stay
/// resolution independent; the pixel radius is derived in `SceneState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Requested dot count.
    pub count: usize,
    /// Dot radius as a fraction of canvas height.
    pub radius_ratio: f64,
    /// Blur spread factor; 0 = hard edge. Values above 1 widen the
    /// effective collision footprint.
    pub softness: f64,
    /// Parallax speed multiplier applied to field velocities.
    pub speed: f64,
    /// Paint style for the snapshot consumer.
    pub style: DrawStyle,
    /// Wrap or bounce at the viewport edge.
    pub boundary: BoundaryMode,
    /// Ordered color swatches for this layer.
    pub palette: Vec<Srgb>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            count: 40,
            radius_ratio: 0.012,
            softness: 0.0,
            speed: 1.0,
            style: DrawStyle::Solid,
            boundary: BoundaryMode::Bounce,
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<Srgb> {
    ["#005f73", "#0a9396", "#94d2bd"]
        .iter()
        .map(|h| Srgb::from_hex(h).expect("default palette hex values are valid"))
        .collect()
}

/// Complete configuration for a dot-field animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dot population mode.
    pub mode: Mode,
    /// Key of the active vector field.
    pub field: String,
    /// Canvas background color.
    pub background: Srgb,
    /// Target physics update rate in frames per second.
    pub fps: f64,
    /// Global multiplier on the minimum spacing enforced during placement.
    pub spacing_factor: f64,
    /// Whether pairwise collisions are resolved (layered mode only).
    pub collisions: bool,
    /// Global speed multiplier applied on top of per-layer speeds.
    pub speed: f64,
    /// Grid-mode settings.
    pub grid: GridConfig,
    /// Depth layers, back to front.
    pub layers: Vec<LayerConfig>,
    /// Per-field parameter records keyed by field name.
    pub fields: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            field: "curl_noise".to_string(),
            background: Srgb {
                r: 0.043,
                g: 0.055,
                b: 0.078,
            },
            fps: 60.0,
            spacing_factor: 1.0,
            collisions: true,
            speed: 1.0,
            grid: GridConfig::default(),
            layers: default_layers(),
            fields: Value::Object(serde_json::Map::new()),
        }
    }
}

/// Three parallax layers, back to front: slow large dots behind, a fast
/// small wrapping foreground in front.
fn default_layers() -> Vec<LayerConfig> {
    vec![
        LayerConfig {
            count: 18,
            radius_ratio: 0.030,
            softness: 1.5,
            speed: 0.4,
            style: DrawStyle::Gradient,
            boundary: BoundaryMode::Bounce,
            ..LayerConfig::default()
        },
        LayerConfig {
            count: 28,
            radius_ratio: 0.018,
            softness: 0.5,
            speed: 0.7,
            ..LayerConfig::default()
        },
        LayerConfig {
            count: 40,
            radius_ratio: 0.008,
            speed: 1.0,
            boundary: BoundaryMode::Wrap,
            ..LayerConfig::default()
        },
    ]
}

/// Fallback when a parameter record is absent for a field key.
static NO_PARAMS: Value = Value::Null;

impl Config {
    /// The configuration for layer `index`, if it exists.
    pub fn layer(&self, index: usize) -> Option<&LayerConfig> {
        self.layers.get(index)
    }

    /// The parameter record for a field key.
    ///
    /// Returns `Value::Null` when the key has no record; the
    /// [`crate::params`] helpers then yield their defaults.
    pub fn field_params(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NO_PARAMS)
    }
}
