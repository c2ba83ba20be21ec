#![deny(unsafe_code)]
//! Core types for the dotfield animation system.
//!
//! Provides the configuration schema (`Config`, `Mode`, `LayerConfig`,
//! `BoundaryMode`), the `Dot` particle and derived `SceneState`, the
//! deterministic noise kernel and `Xorshift64` PRNG, color/palette types,
//! and JSON parameter helpers.

pub mod color;
pub mod config;
pub mod dot;
pub mod error;
pub mod noise;
pub mod palette;
pub mod params;
pub mod prng;
pub mod scene;

pub use color::{OkLch, Srgb};
pub use config::{BoundaryMode, Config, DrawStyle, GridConfig, LayerConfig, Mode};
pub use dot::Dot;
pub use error::CoreError;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use scene::SceneState;
