//! Error types for the fallible edges of the tracer.
//!
//! Geometric queries never fail; a miss is reported through [`crate::Hit`].

use thiserror::Error;

/// Errors from texture construction, configuration and image output.
#[derive(Error, Debug)]
pub enum TracerError {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Texture dimensions do not match its pixel buffer.
    #[error("invalid texture {width}x{height} with {len} pixels")]
    InvalidTexture {
        width: usize,
        height: usize,
        len: usize,
    },

    /// Numeric policy is unusable.
    #[error("invalid tolerances: {0}")]
    InvalidTolerances(String),

    /// A worker panicked while holding a shared buffer.
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TracerError>;
