//! Derived, canvas-size-dependent state.
//!
//! `SceneState` is the single owner of every value computed from the
//! configuration and the canvas dimensions: per-layer pixel radii, the
//! frame interval for the external animation driver, and the vortex
//! center lattice. It is recomputed wholesale whenever configuration or
//! canvas size changes; nothing here is a source of truth.

use glam::DVec2;

use crate::config::Config;
use crate::params::param_f64;

/// Fraction of each canvas dimension by which placement and periodic
/// boundaries extend past the visible edges, so drifting dots never
/// expose a bare border.
pub const VIEW_MARGIN: f64 = 0.1;

/// Radius in pixels used when a dot references a layer index with no
/// configuration behind it.
pub const FALLBACK_RADIUS: f64 = 1.0;

/// Default vortex lattice spacing in pixels.
const DEFAULT_VORTEX_SPACING: f64 = 150.0;

/// Frame rate assumed when the configured fps is degenerate.
const FALLBACK_FPS: f64 = 60.0;

/// Values derived from configuration plus canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    width: f64,
    height: f64,
    layer_radii: Vec<f64>,
    frame_interval_ms: f64,
    vortex_centers: Vec<DVec2>,
}

impl SceneState {
    /// Recomputes all derived state. Pure function of its inputs.
    ///
    /// Degenerate inputs are tolerated: `fps <= 0` falls back to 60Hz and
    /// a non-positive vortex spacing produces an empty center lattice.
    pub fn recompute(config: &Config, width: f64, height: f64) -> Self {
        let layer_radii = config
            .layers
            .iter()
            .map(|layer| height * layer.radius_ratio)
            .collect();

        let fps = if config.fps > 0.0 {
            config.fps
        } else {
            FALLBACK_FPS
        };

        let spacing = param_f64(
            config.field_params("vortex"),
            "spacing",
            DEFAULT_VORTEX_SPACING,
        );

        Self {
            width,
            height,
            layer_radii,
            frame_interval_ms: 1000.0 / fps,
            vortex_centers: vortex_lattice(width, height, spacing),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel radius for a layer, or [`FALLBACK_RADIUS`] when the index
    /// has no configured layer.
    pub fn layer_radius(&self, index: usize) -> f64 {
        self.layer_radii
            .get(index)
            .copied()
            .unwrap_or(FALLBACK_RADIUS)
    }

    /// Per-layer pixel radii, in layer order.
    pub fn layer_radii(&self) -> &[f64] {
        &self.layer_radii
    }

    /// Minimum milliseconds between executed physics ticks.
    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Vortex lattice centers. Empty when spacing was degenerate.
    pub fn vortex_centers(&self) -> &[DVec2] {
        &self.vortex_centers
    }

    /// The expanded-viewport bounds `(min, max)` used for placement and
    /// periodic re-entry.
    pub fn wrap_bounds(&self) -> (DVec2, DVec2) {
        let margin = DVec2::new(self.width, self.height) * VIEW_MARGIN;
        (
            -margin,
            DVec2::new(self.width, self.height) + margin,
        )
    }
}

/// Regular grid of centers spaced across the canvas, offset by half a
/// cell so the lattice straddles the edges evenly. Non-positive spacing
/// yields an empty lattice.
fn vortex_lattice(width: f64, height: f64, spacing: f64) -> Vec<DVec2> {
    if spacing <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let cols = (width / spacing).ceil() as usize;
    let rows = (height / spacing).ceil() as usize;
    let mut centers = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            centers.push(DVec2::new(
                (col as f64 + 0.5) * spacing,
                (row as f64 + 0.5) * spacing,
            ));
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layer_radii_scale_with_canvas_height() {
        let config = Config::default();
        let small = SceneState::recompute(&config, 200.0, 100.0);
        let large = SceneState::recompute(&config, 400.0, 200.0);
        for (s, l) in small.layer_radii().iter().zip(large.layer_radii()) {
            assert!(
                (l - s * 2.0).abs() < 1e-9,
                "radius did not scale: {s} -> {l}"
            );
        }
    }

    #[test]
    fn layer_radius_is_height_times_ratio() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 640.0, 480.0);
        for (i, layer) in config.layers.iter().enumerate() {
            assert!(
                (scene.layer_radius(i) - 480.0 * layer.radius_ratio).abs() < 1e-9,
                "layer {i} radius mismatch"
            );
        }
    }

    #[test]
    fn missing_layer_index_falls_back_to_minimal_radius() {
        let scene = SceneState::recompute(&Config::default(), 100.0, 100.0);
        assert!((scene.layer_radius(999) - FALLBACK_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn frame_interval_is_1000_over_fps() {
        let mut config = Config::default();
        config.fps = 30.0;
        let scene = SceneState::recompute(&config, 100.0, 100.0);
        assert!((scene.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_fps_falls_back_to_60() {
        let mut config = Config::default();
        config.fps = 0.0;
        let scene = SceneState::recompute(&config, 100.0, 100.0);
        assert!((scene.frame_interval_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn vortex_lattice_covers_canvas() {
        let mut config = Config::default();
        config.fields = json!({"vortex": {"spacing": 50.0}});
        let scene = SceneState::recompute(&config, 100.0, 100.0);
        // ceil(100/50) = 2 per axis
        assert_eq!(scene.vortex_centers().len(), 4);
        assert_eq!(scene.vortex_centers()[0], DVec2::new(25.0, 25.0));
    }

    #[test]
    fn vortex_lattice_rebuilt_on_size_change() {
        let mut config = Config::default();
        config.fields = json!({"vortex": {"spacing": 50.0}});
        let small = SceneState::recompute(&config, 100.0, 100.0);
        let wide = SceneState::recompute(&config, 200.0, 100.0);
        assert_eq!(wide.vortex_centers().len(), 2 * small.vortex_centers().len());
    }

    #[test]
    fn non_positive_spacing_yields_empty_lattice() {
        for spacing in [0.0, -10.0] {
            let mut config = Config::default();
            config.fields = json!({"vortex": {"spacing": spacing}});
            let scene = SceneState::recompute(&config, 100.0, 100.0);
            assert!(
                scene.vortex_centers().is_empty(),
                "spacing {spacing} should produce no centers"
            );
        }
    }

    #[test]
    fn wrap_bounds_extend_past_the_viewport() {
        let scene = SceneState::recompute(&Config::default(), 200.0, 100.0);
        let (min, max) = scene.wrap_bounds();
        assert!((min.x - -20.0).abs() < 1e-9);
        assert!((min.y - -10.0).abs() < 1e-9);
        assert!((max.x - 220.0).abs() < 1e-9);
        assert!((max.y - 110.0).abs() < 1e-9);
    }
}
