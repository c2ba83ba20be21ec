//! Dot placement, per-frame simulation, and CPU frame rendering.
//!
//! The crate is split along the frame pipeline: [`placement`] builds and
//! resizes the dot set, [`step`] advances it, [`pixel`] rasterizes it,
//! and [`snapshot`] writes PNG frames when the `png` feature is on.
//! [`Simulation`] ties the pieces together for callers that just want a
//! running system.

#![deny(unsafe_code)]

pub mod pixel;
pub mod placement;
#[cfg(feature = "png")]
pub mod snapshot;
pub mod step;

pub use pixel::rasterize;
pub use placement::{add_dots_to_layer, build_dots, remove_dots_from_layer};
pub use step::{tick, FrameLimiter};

use dotfield_core::config::Config;
use dotfield_core::dot::Dot;
use dotfield_core::prng::Xorshift64;
use dotfield_core::scene::SceneState;

/// A complete running dot field: the dot set, the seeded generator used
/// to grow it, and the animation clock.
///
/// Configuration and scene state stay outside so the caller can rebuild
/// the scene on resize and hand the same config to every call.
#[derive(Debug, Clone)]
pub struct Simulation {
    dots: Vec<Dot>,
    rng: Xorshift64,
    elapsed_secs: f64,
}

impl Simulation {
    /// Places the initial dot set from a seed.
    pub fn new(config: &Config, scene: &SceneState, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let dots = placement::build_dots(config, scene, &mut rng);
        Self {
            dots,
            rng,
            elapsed_secs: 0.0,
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Total animation time advanced so far, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Advances the simulation by `dt_secs` of wall-clock time.
    pub fn step(&mut self, config: &Config, scene: &SceneState, dt_secs: f64) {
        step::tick(
            &mut self.dots,
            config,
            scene,
            self.elapsed_secs,
            dt_secs,
        );
        self.elapsed_secs += dt_secs;
    }

    /// Grows or shrinks one layer to `count` dots without disturbing the
    /// rest of the set.
    pub fn resize_layer(
        &mut self,
        layer_index: usize,
        count: usize,
        config: &Config,
        scene: &SceneState,
    ) {
        let current = self
            .dots
            .iter()
            .filter(|d| d.layer == Some(layer_index))
            .count();
        if count > current {
            placement::add_dots_to_layer(
                &mut self.dots,
                layer_index,
                count - current,
                config,
                scene,
                &mut self.rng,
            );
        } else {
            placement::remove_dots_from_layer(&mut self.dots, layer_index, current - count);
        }
    }

    /// Discards the dot set and re-places everything, e.g. after a mode
    /// switch. The clock keeps running and the generator keeps its
    /// state, so the rebuild differs from the initial placement.
    pub fn rebuild(&mut self, config: &Config, scene: &SceneState) {
        self.dots = placement::build_dots(config, scene, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_run() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 320.0, 240.0);
        let mut a = Simulation::new(&config, &scene, 123);
        let mut b = Simulation::new(&config, &scene, 123);
        for _ in 0..10 {
            a.step(&config, &scene, 1.0 / 60.0);
            b.step(&config, &scene, 1.0 / 60.0);
        }
        assert_eq!(a.dots(), b.dots());
    }

    #[test]
    fn different_seeds_diverge() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 320.0, 240.0);
        let a = Simulation::new(&config, &scene, 1);
        let b = Simulation::new(&config, &scene, 2);
        assert_ne!(a.dots(), b.dots());
    }

    #[test]
    fn step_advances_the_clock() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 320.0, 240.0);
        let mut sim = Simulation::new(&config, &scene, 1);
        sim.step(&config, &scene, 0.25);
        sim.step(&config, &scene, 0.25);
        assert!((sim.elapsed_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn resize_layer_in_both_directions() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 800.0, 600.0);
        let mut sim = Simulation::new(&config, &scene, 7);
        let count = |sim: &Simulation| {
            sim.dots()
                .iter()
                .filter(|d| d.layer == Some(0))
                .count()
        };
        let initial = count(&sim);

        sim.resize_layer(0, initial + 6, &config, &scene);
        assert_eq!(count(&sim), initial + 6);

        sim.resize_layer(0, 2, &config, &scene);
        assert_eq!(count(&sim), 2);
    }

    #[test]
    fn rebuild_replaces_the_dot_set() {
        let config = Config::default();
        let scene = SceneState::recompute(&config, 320.0, 240.0);
        let mut sim = Simulation::new(&config, &scene, 7);
        let before = sim.dots().to_vec();
        sim.rebuild(&config, &scene);
        assert_eq!(sim.dots().len(), before.len());
        assert_ne!(sim.dots(), &before[..]);
    }
}
