//! Per-frame integration: field forces, boundary handling, collisions,
//! and wall-clock frame pacing.

use dotfield_core::config::{BoundaryMode, Config, Mode};
use dotfield_core::dot::Dot;
use dotfield_core::scene::SceneState;
use dotfield_fields::{FieldCtx, FieldKind, VectorField};
use glam::DVec2;

/// Velocity retained along the normal after a wall bounce.
const BOUNCE_DAMPING: f64 = 0.5;

/// Fraction of the visual radius used for collision response. Collision
/// circles are tighter than the drawn dots so contact reads as touching
/// rather than repelling at a distance.
const COLLISION_RADIUS_SCALE: f64 = 0.6;

/// Frame scale of 1.0 corresponds to this rate.
const BASELINE_FPS: f64 = 60.0;

/// Advances every dot by one frame.
///
/// `elapsed_secs` is the total animation time fed to the fields and
/// `dt_secs` the wall-clock delta since the previous frame. Motion is
/// scaled by `dt * 60` so a simulation stepped at 30Hz covers the same
/// ground per second as one stepped at 120Hz.
///
/// An unknown field key leaves all velocities at zero for the frame;
/// rejecting bad keys up front is the caller's job.
pub fn tick(
    dots: &mut [Dot],
    config: &Config,
    scene: &SceneState,
    elapsed_secs: f64,
    dt_secs: f64,
) {
    let frame_scale = dt_secs * BASELINE_FPS;
    let field = FieldKind::from_config(&config.field, config).ok();

    for dot in dots.iter_mut() {
        let ctx = FieldCtx {
            home: dot.home(),
            time: elapsed_secs,
            scene,
        };
        let raw = match &field {
            Some(f) => f.eval(dot.pos, &ctx),
            None => DVec2::ZERO,
        };
        let layer_speed = dot
            .layer
            .and_then(|i| config.layer(i))
            .map_or(1.0, |l| l.speed);
        dot.vel = raw * layer_speed * config.speed;
        dot.pos += dot.vel * frame_scale;
        apply_boundary(dot, config, scene);
    }

    if config.collisions && config.mode == Mode::Layered {
        resolve_collisions(dots, config, scene);
    }
}

/// Boundary rule for a dot. Grid dots always wrap; layered dots follow
/// their layer's configured mode, defaulting to bounce when the layer
/// index is stale.
fn boundary_mode(dot: &Dot, config: &Config) -> BoundaryMode {
    match dot.layer {
        None => BoundaryMode::Wrap,
        Some(i) => config.layer(i).map_or(BoundaryMode::Bounce, |l| l.boundary),
    }
}

fn apply_boundary(dot: &mut Dot, config: &Config, scene: &SceneState) {
    match boundary_mode(dot, config) {
        BoundaryMode::Wrap => {
            let (min, max) = scene.wrap_bounds();
            let span = max - min;
            if span.x > 0.0 {
                dot.pos.x = min.x + (dot.pos.x - min.x).rem_euclid(span.x);
            }
            if span.y > 0.0 {
                dot.pos.y = min.y + (dot.pos.y - min.y).rem_euclid(span.y);
            }
        }
        BoundaryMode::Bounce => {
            // Bounce happens at the visible edge, not the wrap margin,
            // so contained layers never leave the viewport.
            bounce_axis(&mut dot.pos.x, &mut dot.vel.x, 0.0, scene.width());
            bounce_axis(&mut dot.pos.y, &mut dot.vel.y, 0.0, scene.height());
        }
    }
}

fn bounce_axis(pos: &mut f64, vel: &mut f64, min: f64, max: f64) {
    if *pos < min {
        *pos = min;
        *vel = -*vel * BOUNCE_DAMPING;
    } else if *pos > max {
        *pos = max;
        *vel = -*vel * BOUNCE_DAMPING;
    }
}

/// All-pairs elastic collision response for equal-mass dots.
///
/// Overlapping pairs are separated by half the penetration each and
/// exchange the velocity components along the contact normal, which
/// conserves momentum and kinetic energy. Coincident centers are
/// skipped since no normal exists.
fn resolve_collisions(dots: &mut [Dot], config: &Config, scene: &SceneState) {
    let len = dots.len();
    for i in 0..len {
        for j in (i + 1)..len {
            let (head, tail) = dots.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let combined =
                collision_radius(a, config, scene) + collision_radius(b, config, scene);
            let delta = b.pos - a.pos;
            let dist_sq = delta.length_squared();
            if dist_sq == 0.0 || dist_sq >= combined * combined {
                continue;
            }

            let dist = dist_sq.sqrt();
            let normal = delta / dist;
            let penetration = combined - dist;
            a.pos -= normal * (penetration * 0.5);
            b.pos += normal * (penetration * 0.5);

            let a_n = a.vel.dot(normal);
            let b_n = b.vel.dot(normal);
            a.vel += normal * (b_n - a_n);
            b.vel += normal * (a_n - b_n);
        }
    }
}

fn collision_radius(dot: &Dot, config: &Config, scene: &SceneState) -> f64 {
    let base = match dot.layer {
        None => config.grid.radius,
        Some(i) => {
            let softness = config.layer(i).map_or(1.0, |l| l.softness.max(1.0));
            scene.layer_radius(i) * softness
        }
    };
    base * COLLISION_RADIUS_SCALE
}

/// Wall-clock frame pacing at a fixed interval.
///
/// The first call to [`FrameLimiter::ready`] always fires; subsequent
/// calls fire once at least the interval has passed, advancing the
/// reference point to the firing time so drift does not accumulate into
/// bursts.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl FrameLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Whether a frame should run at `now_ms`.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(last) if now_ms - last >= self.interval_ms => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }
}
