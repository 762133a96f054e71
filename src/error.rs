use std::path::PathBuf;

use thiserror::Error;

/// Rejected scene configuration.
///
/// Raised once, before the scene is built. Nothing in the per-frame path
/// returns an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill catalog is empty")]
    EmptyCatalog,

    #[error("duplicate skill name `{0}`")]
    DuplicateName(String),

    #[error("skill `{name}`: orbit radius must be finite and > 0, got {radius}")]
    InvalidRadius { name: String, radius: f32 },

    #[error("skill `{name}`: orbit speed must be finite, got {speed}")]
    InvalidSpeed { name: String, speed: f32 },

    #[error("skill `{name}`: xp must be at most 100, got {xp}")]
    InvalidXp { name: String, xp: u8 },

    #[error("skill `{name}`: invalid accent color `{color}`")]
    InvalidColor { name: String, color: String },

    #[error("smoothing rate `{field}` must be in (0, 1], got {value}")]
    InvalidRate { field: &'static str, value: f32 },

    #[error("zoom distance must be finite and > 0, got {0}")]
    InvalidZoom(f32),

    #[error("sway `{field}` out of range, got {value}")]
    InvalidSway { field: &'static str, value: f32 },
}

/// Failure to turn a skill's icon reference into pixels.
///
/// Only the renderer sees this; the entity keeps orbiting either way.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("icon {path} not found")]
    Missing { path: PathBuf },

    #[error("failed to decode icon {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
