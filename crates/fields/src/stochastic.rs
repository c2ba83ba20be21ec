//! Stochastic fields: per-dot random walk and jittered homesickness.
//!
//! Both fields derive their "randomness" from deterministic hashes and
//! noise samples keyed on the dot's home position, so replaying a seed
//! reproduces the same motion exactly.

use dotfield_core::noise::{hash3, noise3};
use dotfield_core::params::param_f64;
use glam::DVec2;
use serde_json::Value;
use std::f64::consts::TAU;

use crate::{FieldCtx, VectorField};

const DEFAULT_WALK_SPEED: f64 = 1.2;
const DEFAULT_TURN_SPEED: f64 = 0.5;
const DEFAULT_JITTER: f64 = 2.0;
const DEFAULT_STIFFNESS: f64 = 0.05;
const DEFAULT_JITTER_RATE: f64 = 4.0;

/// Distance from home beyond which shiver jitter is attenuated, keeping
/// dots from drifting without bound.
const DRIFT_THRESHOLD: f64 = 50.0;

/// Per-dot random walk with smoothly easing headings.
///
/// Every `1 / turn_speed` seconds each dot picks a new target heading
/// from a hash of its home position and the current time bucket. The
/// realized heading is smoothstep-eased from the current bucket's target
/// to the next bucket's target over the bucket, so direction never snaps
/// at a bucket boundary.
#[derive(Debug, Clone, Copy)]
pub struct RandomWalk {
    pub speed: f64,
    pub turn_speed: f64,
}

impl RandomWalk {
    pub fn from_json(params: &Value) -> Self {
        Self {
            speed: param_f64(params, "speed", DEFAULT_WALK_SPEED),
            turn_speed: param_f64(params, "turn_speed", DEFAULT_TURN_SPEED),
        }
    }

    /// Target heading (radians) for a dot in the given time bucket.
    fn target_heading(home: DVec2, bucket: i64) -> f64 {
        TAU * hash3(home.x.to_bits() as i64, home.y.to_bits() as i64, bucket)
    }

    /// The eased heading for a dot at `time` seconds.
    fn heading(&self, home: DVec2, time: f64) -> f64 {
        let period = 1.0 / self.turn_speed.max(1e-9);
        let bucket = (time / period).floor();
        let frac = time / period - bucket;
        let from = Self::target_heading(home, bucket as i64);
        let to = Self::target_heading(home, bucket as i64 + 1);
        from + (to - from) * smoothstep(frac)
    }
}

impl VectorField for RandomWalk {
    fn eval(&self, _pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let heading = self.heading(ctx.home, ctx.time);
        DVec2::new(heading.cos(), heading.sin()) * self.speed
    }
}

/// Noise jitter plus a spring pulling back toward home.
#[derive(Debug, Clone, Copy)]
pub struct Shiver {
    pub jitter: f64,
    pub stiffness: f64,
    pub rate: f64,
}

impl Shiver {
    pub fn from_json(params: &Value) -> Self {
        Self {
            jitter: param_f64(params, "jitter", DEFAULT_JITTER),
            stiffness: param_f64(params, "stiffness", DEFAULT_STIFFNESS),
            rate: param_f64(params, "rate", DEFAULT_JITTER_RATE),
        }
    }
}

impl VectorField for Shiver {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let spring = (ctx.home - pos) * self.stiffness;

        let st = ctx.time * self.rate;
        let jx = (noise3(ctx.home.x * 0.05, ctx.home.y * 0.05, st) - 0.5) * 2.0;
        let jy = (noise3(ctx.home.x * 0.05 + 100.0, ctx.home.y * 0.05 + 100.0, st) - 0.5) * 2.0;
        let mut jitter = DVec2::new(jx, jy) * self.jitter;

        // Past the drift threshold the spring must win.
        let dist = (pos - ctx.home).length();
        if dist > DRIFT_THRESHOLD {
            jitter *= DRIFT_THRESHOLD / dist;
        }

        spring + jitter
    }
}

/// Cubic smoothstep `3t^2 - 2t^3` for t clamped to [0, 1].
fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotfield_core::config::Config;
    use dotfield_core::scene::SceneState;
    use serde_json::json;

    fn scene() -> SceneState {
        SceneState::recompute(&Config::default(), 400.0, 300.0)
    }

    fn ctx_at(scene: &SceneState, home: DVec2, time: f64) -> FieldCtx<'_> {
        FieldCtx { home, time, scene }
    }

    #[test]
    fn random_walk_speed_sets_magnitude() {
        let walk = RandomWalk {
            speed: 3.0,
            turn_speed: 0.5,
        };
        let s = scene();
        let c = ctx_at(&s, DVec2::new(12.0, 34.0), 0.8);
        let v = walk.eval(DVec2::ZERO, &c);
        assert!(
            (v.length() - 3.0).abs() < 1e-9,
            "expected unit heading scaled by speed, got length {}",
            v.length()
        );
    }

    #[test]
    fn random_walk_heading_continuous_at_bucket_boundary() {
        let walk = RandomWalk {
            speed: 1.0,
            turn_speed: 0.5, // period = 2s, boundary at t = 2
        };
        let home = DVec2::new(7.0, 11.0);
        let before = walk.heading(home, 2.0 - 1e-9);
        let after = walk.heading(home, 2.0 + 1e-9);
        assert!(
            (before - after).abs() < 1e-4,
            "heading snapped at bucket boundary: {before} vs {after}"
        );
        // And at the boundary the eased heading equals the new bucket's
        // starting target, i.e. what the previous bucket eased toward.
        let target = RandomWalk::target_heading(home, 1);
        assert!((walk.heading(home, 2.0) - target).abs() < 1e-9);
    }

    #[test]
    fn random_walk_distinct_homes_walk_differently() {
        let walk = RandomWalk::from_json(&json!({}));
        let s = scene();
        let va = walk.eval(DVec2::ZERO, &ctx_at(&s, DVec2::new(10.0, 20.0), 0.5));
        let vb = walk.eval(DVec2::ZERO, &ctx_at(&s, DVec2::new(11.0, 21.0), 0.5));
        assert_ne!(va, vb, "neighboring dots share a heading");
    }

    #[test]
    fn random_walk_heading_changes_across_buckets() {
        let walk = RandomWalk {
            speed: 1.0,
            turn_speed: 1.0,
        };
        let home = DVec2::new(3.0, 4.0);
        let h0 = RandomWalk::target_heading(home, 0);
        let h1 = RandomWalk::target_heading(home, 1);
        assert_ne!(h0.to_bits(), h1.to_bits());
    }

    #[test]
    fn shiver_spring_points_home() {
        let shiver = Shiver {
            jitter: 0.0,
            stiffness: 0.1,
            rate: 1.0,
        };
        let s = scene();
        let home = DVec2::new(100.0, 100.0);
        let c = ctx_at(&s, home, 0.0);
        let pos = DVec2::new(110.0, 90.0);
        let v = shiver.eval(pos, &c);
        let toward = home - pos;
        assert!(
            v.dot(toward) > 0.0,
            "spring does not point toward home: {v:?}"
        );
        assert!((v - toward * 0.1).length() < 1e-12);
    }

    #[test]
    fn shiver_jitter_attenuates_past_threshold() {
        let shiver = Shiver {
            jitter: 2.0,
            stiffness: 0.0,
            rate: 1.0,
        };
        let s = scene();
        let home = DVec2::ZERO;
        let c = ctx_at(&s, home, 0.3);
        let near = shiver.eval(DVec2::new(10.0, 0.0), &c).length();
        let far = shiver.eval(DVec2::new(200.0, 0.0), &c).length();
        // With no spring, jitter at 200 units out is scaled by 50/200.
        assert!(
            (far - near * 0.25).abs() < 1e-9,
            "attenuation mismatch: near={near}, far={far}"
        );
    }

    #[test]
    fn shiver_inside_threshold_is_unattenuated() {
        let shiver = Shiver {
            jitter: 1.5,
            stiffness: 0.0,
            rate: 2.0,
        };
        let s = scene();
        let c = ctx_at(&s, DVec2::ZERO, 0.9);
        let at_home = shiver.eval(DVec2::ZERO, &c);
        let nearby = shiver.eval(DVec2::new(49.0, 0.0), &c);
        assert_eq!(at_home, nearby, "jitter should ignore position inside threshold");
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
    }
}
