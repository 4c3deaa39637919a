//! Error types
//!
//! Only startup can fail, on missing assets or unreadable configuration.
//! Bad command lines are reported by clap. The per-frame simulation is total
//! and never returns errors.

use std::path::PathBuf;

use thiserror::Error;

/// Asset loading failures. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A required image or sound is not present
    #[error("Missing {kind} asset: {}", .path.display())]
    Missing { kind: &'static str, path: PathBuf },

    /// The file exists but could not be read
    #[error("Failed to read asset '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a usable image
    #[error("Invalid image '{}': {reason}", .path.display())]
    BadImage { path: PathBuf, reason: String },
}

/// Configuration file failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for the binary
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
