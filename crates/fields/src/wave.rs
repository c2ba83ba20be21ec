//! Wave-driven fields: traveling, standing, multi-component, and
//! wave-plus-noise.

use dotfield_core::noise::noise3;
use dotfield_core::params::param_f64;
use glam::DVec2;
use serde_json::Value;

use crate::{FieldCtx, VectorField};

const DEFAULT_AMPLITUDE: f64 = 1.5;
const DEFAULT_WAVENUMBER: f64 = 0.02;
const DEFAULT_FREQUENCY: f64 = 2.0;
const DEFAULT_NOISE_AMPLITUDE: f64 = 0.8;
const DEFAULT_NOISE_SCALE: f64 = 0.01;
const DEFAULT_NOISE_RATE: f64 = 0.4;

/// Horizontal traveling wave: `dx = amp * sin(k*x - w*t)`, `dy = 0`.
#[derive(Debug, Clone, Copy)]
pub struct TravelingWave {
    pub amplitude: f64,
    pub wavenumber: f64,
    pub frequency: f64,
}

impl TravelingWave {
    pub fn from_json(params: &Value) -> Self {
        Self {
            amplitude: param_f64(params, "amplitude", DEFAULT_AMPLITUDE),
            wavenumber: param_f64(params, "wavenumber", DEFAULT_WAVENUMBER),
            frequency: param_f64(params, "frequency", DEFAULT_FREQUENCY),
        }
    }
}

impl VectorField for TravelingWave {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let dx = self.amplitude * (self.wavenumber * pos.x - self.frequency * ctx.time).sin();
        DVec2::new(dx, 0.0)
    }
}

/// Standing wave: `dx = amp * sin(k*x) * cos(w*t)`, `dy = 0`.
///
/// Spatial and temporal terms are separable, so nodes at `sin(k*x) = 0`
/// stay fixed while the rest of the canvas oscillates in place.
#[derive(Debug, Clone, Copy)]
pub struct StandingWave {
    pub amplitude: f64,
    pub wavenumber: f64,
    pub frequency: f64,
}

impl StandingWave {
    pub fn from_json(params: &Value) -> Self {
        Self {
            amplitude: param_f64(params, "amplitude", DEFAULT_AMPLITUDE),
            wavenumber: param_f64(params, "wavenumber", DEFAULT_WAVENUMBER),
            frequency: param_f64(params, "frequency", DEFAULT_FREQUENCY),
        }
    }
}

impl VectorField for StandingWave {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let dx = self.amplitude
            * (self.wavenumber * pos.x).sin()
            * (self.frequency * ctx.time).cos();
        DVec2::new(dx, 0.0)
    }
}

/// One component of a [`MultiWave`] superposition.
#[derive(Debug, Clone, Copy)]
pub struct WaveComponent {
    pub wavenumber: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
    /// Propagation direction in radians.
    pub angle: f64,
}

impl WaveComponent {
    fn from_json(record: &Value) -> Self {
        Self {
            wavenumber: param_f64(record, "wavenumber", DEFAULT_WAVENUMBER),
            frequency: param_f64(record, "frequency", DEFAULT_FREQUENCY),
            amplitude: param_f64(record, "amplitude", DEFAULT_AMPLITUDE),
            phase: param_f64(record, "phase", 0.0),
            angle: param_f64(record, "angle", 0.0),
        }
    }
}

/// Superposition of independently parameterized wave components.
///
/// Each component oscillates perpendicular to its own propagation
/// direction (transverse), and the contributions sum.
#[derive(Debug, Clone)]
pub struct MultiWave {
    pub components: Vec<WaveComponent>,
}

impl MultiWave {
    /// Reads the `waves` array from the parameter record. A missing or
    /// empty array falls back to a three-component default spread.
    pub fn from_json(params: &Value) -> Self {
        let components: Vec<WaveComponent> = params
            .get("waves")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(WaveComponent::from_json).collect())
            .unwrap_or_default();
        if components.is_empty() {
            return Self {
                components: Self::default_components(),
            };
        }
        Self { components }
    }

    fn default_components() -> Vec<WaveComponent> {
        [(0.02, 2.0, 1.2, 0.0), (0.035, 1.3, 0.8, 1.1), (0.05, 2.9, 0.5, 2.4)]
            .iter()
            .map(|&(wavenumber, frequency, amplitude, angle)| WaveComponent {
                wavenumber,
                frequency,
                amplitude,
                phase: 0.0,
                angle,
            })
            .collect()
    }
}

impl VectorField for MultiWave {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        self.components.iter().fold(DVec2::ZERO, |acc, c| {
            let dir = DVec2::new(c.angle.cos(), c.angle.sin());
            let perp = DVec2::new(-dir.y, dir.x);
            let phase = c.wavenumber * pos.dot(dir) - c.frequency * ctx.time + c.phase;
            acc + perp * (c.amplitude * phase.sin())
        })
    }
}

/// Traveling wave plus an independent additive noise perturbation.
#[derive(Debug, Clone, Copy)]
pub struct WaveNoise {
    pub wave: TravelingWave,
    pub noise_amplitude: f64,
    pub noise_scale: f64,
    pub noise_rate: f64,
}

impl WaveNoise {
    pub fn from_json(params: &Value) -> Self {
        Self {
            wave: TravelingWave::from_json(params),
            noise_amplitude: param_f64(params, "noise_amplitude", DEFAULT_NOISE_AMPLITUDE),
            noise_scale: param_f64(params, "noise_scale", DEFAULT_NOISE_SCALE),
            noise_rate: param_f64(params, "noise_rate", DEFAULT_NOISE_RATE),
        }
    }
}

impl VectorField for WaveNoise {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        let base = self.wave.eval(pos, ctx);
        let sx = pos.x * self.noise_scale;
        let sy = pos.y * self.noise_scale;
        let st = ctx.time * self.noise_rate;
        // Two offset samples give independent per-axis perturbations,
        // recentered from [0, 1) to [-1, 1).
        let nx = (noise3(sx, sy, st) - 0.5) * 2.0;
        let ny = (noise3(sx + 100.0, sy + 100.0, st) - 0.5) * 2.0;
        base + DVec2::new(nx, ny) * self.noise_amplitude
    }
}
