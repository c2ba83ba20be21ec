//! Initial dot placement and incremental layer resizing.
//!
//! Grid mode lays out a regular lattice that over-fills the viewport by
//! the scene margin. Layered mode places each layer's dots by rejection
//! sampling against everything placed so far (earlier layers included),
//! giving up after a bounded number of attempts so the requested count is
//! always honored even in infeasible configurations.

use dotfield_core::color::Srgb;
use dotfield_core::config::{Config, LayerConfig, Mode};
use dotfield_core::dot::Dot;
use dotfield_core::palette::jitter_lightness;
use dotfield_core::prng::Xorshift64;
use dotfield_core::scene::{SceneState, FALLBACK_RADIUS};
use glam::DVec2;

/// Candidate positions tried per dot before placing unconditionally.
const MAX_ATTEMPTS: usize = 100;

/// Half-width of the per-dot OKLCh lightness perturbation.
const LIGHTNESS_JITTER: f64 = 0.04;

/// Builds the full dot set for the configured mode.
pub fn build_dots(config: &Config, scene: &SceneState, rng: &mut Xorshift64) -> Vec<Dot> {
    match config.mode {
        Mode::Grid => grid_dots(config, scene),
        Mode::Layered => {
            let mut dots = Vec::new();
            for (index, layer) in config.layers.iter().enumerate() {
                place_layer_dots(&mut dots, index, layer, layer.count, config, scene, rng);
            }
            dots
        }
    }
}

/// Appends `count` dots to a layer using the same rejection-sampling rule
/// against the current dot set. A missing layer index is a no-op.
pub fn add_dots_to_layer(
    dots: &mut Vec<Dot>,
    layer_index: usize,
    count: usize,
    config: &Config,
    scene: &SceneState,
    rng: &mut Xorshift64,
) {
    if let Some(layer) = config.layer(layer_index) {
        place_layer_dots(dots, layer_index, layer, count, config, scene, rng);
    }
}

/// Removes up to `count` dots from a layer, most recently added first,
/// so the surviving dots keep their placement.
pub fn remove_dots_from_layer(dots: &mut Vec<Dot>, layer_index: usize, count: usize) {
    let mut remaining = count;
    let mut i = dots.len();
    while remaining > 0 && i > 0 {
        i -= 1;
        if dots[i].layer == Some(layer_index) {
            dots.remove(i);
            remaining -= 1;
        }
    }
}

/// Regular lattice over the expanded viewport. Degenerate spacing yields
/// an empty set.
fn grid_dots(config: &Config, scene: &SceneState) -> Vec<Dot> {
    let spacing = config.grid.spacing;
    if spacing <= 0.0 {
        return Vec::new();
    }
    let (min, max) = scene.wrap_bounds();
    let cols = ((max.x - min.x) / spacing).ceil() as usize;
    let rows = ((max.y - min.y) / spacing).ceil() as usize;

    let mut dots = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let home = min + DVec2::new(col as f64, row as f64) * spacing;
            dots.push(Dot::new(home, None, config.grid.color, 0));
        }
    }
    dots
}

fn place_layer_dots(
    dots: &mut Vec<Dot>,
    index: usize,
    layer: &LayerConfig,
    count: usize,
    config: &Config,
    scene: &SceneState,
    rng: &mut Xorshift64,
) {
    let (min, max) = scene.wrap_bounds();
    let radius = spacing_radius_for_layer(layer, index, config, scene);

    for _ in 0..count {
        // Count guarantee beats strict non-overlap: after the attempt
        // cap the last candidate is placed even if it still collides.
        let mut candidate = DVec2::ZERO;
        for _ in 0..MAX_ATTEMPTS {
            candidate = DVec2::new(rng.next_range(min.x, max.x), rng.next_range(min.y, max.y));
            if !overlaps(candidate, radius, dots, config, scene) {
                break;
            }
        }
        let (palette_index, color) = pick_color(layer, rng);
        dots.push(Dot::new(candidate, Some(index), color, palette_index));
    }
}

/// True when `candidate` is within combined spacing radius of any
/// already-placed dot.
fn overlaps(candidate: DVec2, radius: f64, dots: &[Dot], config: &Config, scene: &SceneState) -> bool {
    dots.iter().any(|dot| {
        let combined = radius + spacing_radius(dot, config, scene);
        candidate.distance_squared(dot.pos) < combined * combined
    })
}

/// Minimum-spacing radius enforced at placement time for a layer.
fn spacing_radius_for_layer(
    layer: &LayerConfig,
    index: usize,
    config: &Config,
    scene: &SceneState,
) -> f64 {
    scene.layer_radius(index) * layer.softness.max(1.0) * config.spacing_factor
}

/// Spacing radius of an existing dot.
fn spacing_radius(dot: &Dot, config: &Config, scene: &SceneState) -> f64 {
    match dot.layer {
        None => config.grid.radius * config.spacing_factor,
        Some(i) => match config.layer(i) {
            Some(layer) => spacing_radius_for_layer(layer, i, config, scene),
            None => FALLBACK_RADIUS,
        },
    }
}

/// Picks a swatch uniformly from the layer palette and perturbs its
/// lightness so same-swatch dots are not identical. An empty palette
/// falls back to white.
fn pick_color(layer: &LayerConfig, rng: &mut Xorshift64) -> (usize, Srgb) {
    if layer.palette.is_empty() {
        return (
            0,
            Srgb {
                r: 1.0,
                g: 1.0,
                b: 1.0,
            },
        );
    }
    let index = rng.next_usize(layer.palette.len());
    (
        index,
        jitter_lightness(layer.palette[index], LIGHTNESS_JITTER, rng),
    )
}
