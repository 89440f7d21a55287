//! Error types for texture management, light configuration and startup.
//!
//! Resource acquisition failures abort the single operation that caused them
//! and leave shared pool state untouched. Per-frame problems never reach these
//! types; they are guarded and logged in place.

use std::path::PathBuf;

use thiserror::Error;

/// Loading a single texture failed. The slot stays unpopulated.
#[derive(Error, Debug)]
pub enum TextureLoadError {
    #[error("could not decode texture {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {path:?} requests {channels} channels, only 1 to 4 are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    #[error("texture {path:?} has a zero-sized dimension ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("uploading texture {path:?} failed: {reason}")]
    Upload { path: PathBuf, reason: String },

    #[error("texture slot for unit {unit} is already populated")]
    AlreadyLoaded { unit: u32 },
}

/// Errors reported by [`crate::data_structures::texture::TextureManager`].
#[derive(Error, Debug)]
pub enum TextureManagerError {
    #[error("texture manager is full, all {capacity} slots are in use")]
    Capacity { capacity: usize },

    #[error(transparent)]
    Load(#[from] TextureLoadError),
}

/// A light count outside `[0, max]` was requested.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("light count {requested} is outside of 0..={max}")]
pub struct InvalidLightCount {
    pub requested: i64,
    pub max: usize,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    TextureManager(#[from] TextureManagerError),

    #[error(transparent)]
    TextureLoad(#[from] TextureLoadError),

    #[error(transparent)]
    LightCount(#[from] InvalidLightCount),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
