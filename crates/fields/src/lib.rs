#![deny(unsafe_code)]
//! Vector field library: named motion models for dot animation.
//!
//! A vector field maps a position plus an evaluation context to a
//! velocity (not a pre-scaled displacement; the simulation step owns the
//! timestep). All fields are pure functions of position, context, and
//! their parameters; none retain per-call state.
//!
//! Fields are addressed by a stable string key through [`FieldKind`], a
//! closed registry enum. Adding a field means adding a variant and a
//! `from_config` arm; no other dispatch exists.

pub mod flow;
pub mod stochastic;
pub mod wave;

use dotfield_core::config::Config;
use dotfield_core::error::CoreError;
use dotfield_core::scene::SceneState;
use glam::DVec2;

pub use flow::{CellularFlow, CurlNoise, VortexLattice};
pub use stochastic::{RandomWalk, Shiver};
pub use wave::{MultiWave, StandingWave, TravelingWave, WaveNoise};

/// All recognized field keys.
const FIELD_NAMES: &[&str] = &[
    "random_walk",
    "shiver",
    "traveling_wave",
    "standing_wave",
    "curl_noise",
    "multi_wave",
    "vortex",
    "wave_noise",
    "cellular",
];

/// Ephemeral evaluation context passed to every field.
///
/// Carries the dot's immutable home anchor, the elapsed simulation time
/// in seconds, and the derived scene state (vortex lattice, canvas size).
#[derive(Debug, Clone, Copy)]
pub struct FieldCtx<'a> {
    /// Home position of the dot being evaluated.
    pub home: DVec2,
    /// Elapsed simulation time in seconds.
    pub time: f64,
    /// Derived scene state.
    pub scene: &'a SceneState,
}

/// A velocity field over the canvas.
///
/// Implementations must be deterministic: identical inputs produce
/// identical output.
pub trait VectorField {
    /// Evaluates the velocity at `pos` for the given context, in pixels
    /// per 60Hz frame.
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2;
}

/// Closed registry of all vector fields.
///
/// Construct with [`FieldKind::from_config`]; each variant carries its
/// parameters parsed from the config's per-field record.
pub enum FieldKind {
    RandomWalk(RandomWalk),
    Shiver(Shiver),
    TravelingWave(TravelingWave),
    StandingWave(StandingWave),
    CurlNoise(CurlNoise),
    MultiWave(MultiWave),
    Vortex(VortexLattice),
    WaveNoise(WaveNoise),
    Cellular(CellularFlow),
}

impl FieldKind {
    /// Constructs a field by key, reading its parameter record from
    /// `config.fields[key]`.
    ///
    /// Returns `CoreError::UnknownField` for an unrecognized key.
    pub fn from_config(key: &str, config: &Config) -> Result<Self, CoreError> {
        let params = config.field_params(key);
        match key {
            "random_walk" => Ok(FieldKind::RandomWalk(RandomWalk::from_json(params))),
            "shiver" => Ok(FieldKind::Shiver(Shiver::from_json(params))),
            "traveling_wave" => Ok(FieldKind::TravelingWave(TravelingWave::from_json(params))),
            "standing_wave" => Ok(FieldKind::StandingWave(StandingWave::from_json(params))),
            "curl_noise" => Ok(FieldKind::CurlNoise(CurlNoise::from_json(params))),
            "multi_wave" => Ok(FieldKind::MultiWave(MultiWave::from_json(params))),
            "vortex" => Ok(FieldKind::Vortex(VortexLattice::from_json(params))),
            "wave_noise" => Ok(FieldKind::WaveNoise(WaveNoise::from_json(params))),
            "cellular" => Ok(FieldKind::Cellular(CellularFlow::from_json(params))),
            _ => Err(CoreError::UnknownField(key.to_string())),
        }
    }

    /// Returns a slice of all recognized field keys.
    pub fn list_fields() -> &'static [&'static str] {
        FIELD_NAMES
    }
}

impl VectorField for FieldKind {
    fn eval(&self, pos: DVec2, ctx: &FieldCtx) -> DVec2 {
        match self {
            FieldKind::RandomWalk(f) => f.eval(pos, ctx),
            FieldKind::Shiver(f) => f.eval(pos, ctx),
            FieldKind::TravelingWave(f) => f.eval(pos, ctx),
            FieldKind::StandingWave(f) => f.eval(pos, ctx),
            FieldKind::CurlNoise(f) => f.eval(pos, ctx),
            FieldKind::MultiWave(f) => f.eval(pos, ctx),
            FieldKind::Vortex(f) => f.eval(pos, ctx),
            FieldKind::WaveNoise(f) => f.eval(pos, ctx),
            FieldKind::Cellular(f) => f.eval(pos, ctx),
        }
    }
}
