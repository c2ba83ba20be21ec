//! The simulated particle.

use glam::DVec2;

use crate::color::Srgb;

/// One animated dot.
///
/// `home` is the anchor position assigned at placement: restorative fields
/// steer toward it, stochastic fields hash it for per-dot identity, and
/// periodic boundaries re-enter relative to it. It never changes after
/// creation; only `pos` and `vel` mutate during simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    /// Current position in canvas pixels.
    pub pos: DVec2,
    home: DVec2,
    /// Current velocity in pixels per 60Hz frame.
    pub vel: DVec2,
    /// Depth layer index, or `None` for grid-mode dots.
    pub layer: Option<usize>,
    /// Resolved display color.
    pub color: Srgb,
    /// Index of the chosen swatch in the layer palette. Used for
    /// deterministic back-to-front ordering within a layer.
    pub palette_index: usize,
}

impl Dot {
    /// Creates a dot at rest at its home position.
    pub fn new(home: DVec2, layer: Option<usize>, color: Srgb, palette_index: usize) -> Self {
        Self {
            pos: home,
            home,
            vel: DVec2::ZERO,
            layer,
            color,
            palette_index,
        }
    }

    /// The immutable anchor position.
    pub fn home(&self) -> DVec2 {
        self.home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Srgb {
        Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }

    #[test]
    fn new_dot_starts_at_home_and_at_rest() {
        let d = Dot::new(DVec2::new(3.0, 4.0), Some(1), white(), 2);
        assert_eq!(d.pos, d.home());
        assert_eq!(d.vel, DVec2::ZERO);
        assert_eq!(d.layer, Some(1));
        assert_eq!(d.palette_index, 2);
    }

    #[test]
    fn home_is_unchanged_by_position_updates() {
        let mut d = Dot::new(DVec2::new(1.0, 2.0), None, white(), 0);
        d.pos += DVec2::new(10.0, -5.0);
        d.vel = DVec2::new(0.5, 0.5);
        assert_eq!(d.home(), DVec2::new(1.0, 2.0));
    }
}
