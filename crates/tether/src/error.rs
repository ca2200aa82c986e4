//! # Error Types
//!
//! Construction failures surface to the spawn caller; configuration
//! failures surface to whoever loads the file. Dead references are not
//! errors and have no variant here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single spawn call.
///
/// Entities and tag bindings committed before the failure point stay in
/// place; construction is not rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Every entity slot is occupied.
    #[error("world full: all {capacity} entity slots in use")]
    WorldFull {
        /// The world's capacity.
        capacity: usize,
    },

    /// An animation id is unknown to the animation catalog.
    #[error("missing animation asset: {anim}")]
    MissingAsset {
        /// The animation id that failed to resolve.
        anim: String,
    },
}

/// Result type for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors loading configuration, catalog, or level files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reads a whole file, tagging I/O failures with the path.
pub(crate) fn read_file(path: &std::path::Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
