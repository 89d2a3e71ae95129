//! Error types for skilltree-cli

use thiserror::Error;

/// Result type alias for skilltree-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skilltree-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the skill tree libraries
    #[error(transparent)]
    Core(#[from] skilltree_core::Error),

    /// A config file could not be parsed
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config value could not be written as TOML
    #[error("Could not write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Validation found problems in a save file
    #[error("{count} problem(s) found in {path}")]
    Invalid {
        /// File that was validated
        path: String,
        /// Number of problems reported
        count: usize,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error carrying the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        Self::Core(skilltree_core::Error::io_with_path(source, path))
    }
}
