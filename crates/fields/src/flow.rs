//! Flow fields: curl noise, the vortex lattice, and cellular circulation.

use dotfield_core::noise::noise3;
use dotfield_core::params::param_f64;
use glam::DVec2;
use serde_json::Value;

use crate::{FieldCtx, VectorField};

/// Distances below this are treated as coincident.
const SINGULARITY_EPS: f64 = 1e-10;

/// Finite-difference step in noise space.
const CURL_EPS: f64 = 0.001;

const DEFAULT_CURL_SCALE: f64 = 0.005;
const DEFAULT_CURL_STRENGTH: f64 = 2.0;
const DEFAULT_CURL_RATE: f64 = 0.1;
const DEFAULT_VORTEX_STRENGTH: f64 = 1.5;
const DEFAULT_VORTEX_RADIUS: f64 = 80.0;
const DEFAULT_CELL_SIZE: f64 = 100.0;
const DEFAULT_CELL_STRENGTH: f64 = 1.5;

/// Curl of a scalar noise field: approximately divergence-free flow.
///
/// Velocity is the perpendicular gradient of [`noise3`], estimated by
/// central finite differences with step [`CURL_EPS`] in noise space.
/// Divergence-free flow neither clumps nor disperses the dots.
#[derive(Debug, Clone, Copy)]
pub struct CurlNoise {
    pub scale: f64,
    pub strength: f64,
    pub rate: f64,
}

impl CurlNoise {
    pub fn from_json(params: &Value) -> Self {
        Self {
            scale: param_f64(params, "scale", DEFAULT_CURL_SCALE),
            strength: param_f64(params, "strength", DEFAULT_CURL_STRENGTH),
            rate: param_f64(params, "rate", DEFAULT_CURL_RATE),
        }
    }
}

impl VectorField for CurlNoise {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let sx = pos.x * self.scale;
        let sy = pos.y * self.scale;
        let st = ctx.time * self.rate;
        // Curl of scalar F in 2D: (dF/dy, -dF/dx)
        let df_dy = (noise3(sx, sy + CURL_EPS, st) - noise3(sx, sy - CURL_EPS, st))
            / (2.0 * CURL_EPS);
        let df_dx = (noise3(sx + CURL_EPS, sy, st) - noise3(sx - CURL_EPS, sy, st))
            / (2.0 * CURL_EPS);
        DVec2::new(df_dy, -df_dx) * self.strength
    }
}

/// Sum of rotational contributions from every center in the scene's
/// vortex lattice, each with a Gaussian envelope `exp(-d^2 / R^2)`.
///
/// The sign of `strength` sets the rotation direction. An empty lattice
/// (degenerate spacing) contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct VortexLattice {
    pub strength: f64,
    pub radius: f64,
}

impl VortexLattice {
    pub fn from_json(params: &Value) -> Self {
        Self {
            strength: param_f64(params, "strength", DEFAULT_VORTEX_STRENGTH),
            radius: param_f64(params, "radius", DEFAULT_VORTEX_RADIUS),
        }
    }
}

impl VectorField for VortexLattice {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        if self.radius.abs() < SINGULARITY_EPS {
            return DVec2::ZERO;
        }
        let r_sq = self.radius * self.radius;
        ctx.scene
            .vortex_centers()
            .iter()
            .fold(DVec2::ZERO, |acc, &center| {
                acc + swirl(pos, center, self.strength, r_sq)
            })
    }
}

/// Square lattice of counter-rotating cells.
///
/// At any point the four nearest cell corners contribute a rotational
/// field with Gaussian falloff; adjacent corners spin in opposite
/// directions so each cell circulates as a unit.
#[derive(Debug, Clone, Copy)]
pub struct CellularFlow {
    pub cell_size: f64,
    pub strength: f64,
}

impl CellularFlow {
    pub fn from_json(params: &Value) -> Self {
        Self {
            cell_size: param_f64(params, "cell_size", DEFAULT_CELL_SIZE),
            strength: param_f64(params, "strength", DEFAULT_CELL_STRENGTH),
        }
    }
}

impl VectorField for CellularFlow {
    fn eval(&self, pos: DVec2, _ctx: &FieldCtx) -> DVec2 {
        if self.cell_size <= 0.0 {
            return DVec2::ZERO;
        }
        let col = (pos.x / self.cell_size).floor() as i64;
        let row = (pos.y / self.cell_size).floor() as i64;
        let falloff_sq = (self.cell_size * 0.5) * (self.cell_size * 0.5);

        let mut vel = DVec2::ZERO;
        for dj in 0..2_i64 {
            for di in 0..2_i64 {
                let corner = DVec2::new(
                    (col + di) as f64 * self.cell_size,
                    (row + dj) as f64 * self.cell_size,
                );
                let sign = if (col + di + row + dj) % 2 == 0 {
                    1.0
                } else {
                    -1.0
                };
                vel += swirl(pos, corner, self.strength * sign, falloff_sq);
            }
        }
        vel
    }
}

/// Rotational contribution around `center`: perpendicular of the radius
/// vector, scaled by a Gaussian envelope. Zero at the center itself.
fn swirl(pos: DVec2, center: DVec2, strength: f64, radius_sq: f64) -> DVec2 {
    let r = pos - center;
    let dist_sq = r.length_squared();
    let dist = dist_sq.sqrt();
    if dist < SINGULARITY_EPS {
        return DVec2::ZERO;
    }
    let envelope = (-dist_sq / radius_sq).exp();
    DVec2::new(-r.y, r.x) / dist * strength * envelope
}
