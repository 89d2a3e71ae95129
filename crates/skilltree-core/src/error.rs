//! Error types for the skill tree core library.

use std::path::{Path, PathBuf};

use crate::types::NodeId;

/// Errors that can occur while editing or persisting a skill tree.
///
/// Self-loops and duplicate edges are deliberately absent: both are
/// idempotent no-ops reported through link outcomes, not failures.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operation referenced a node id that is not live.
    #[error("Unknown node: {id}")]
    UnknownNode {
        /// The id that was not found
        id: NodeId,
    },

    /// A node was inserted with an id that is already live.
    #[error("Duplicate node id: {id}")]
    DuplicateId {
        /// The conflicting id
        id: NodeId,
    },

    /// Every node id has been handed out; renumber before creating more.
    #[error("Node id space exhausted; renumber the graph before adding nodes")]
    IdSpaceExhausted,

    /// A coordinate is NaN or infinite.
    #[error("Invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition {
        /// Horizontal coordinate
        x: f64,
        /// Vertical coordinate
        y: f64,
    },

    /// A node removal was attempted while edges still reference it.
    #[error("Node {id} still has {edges} connection(s); sever them before removal")]
    StillConnected {
        /// The node that was to be removed
        id: NodeId,
        /// Number of edges still attached
        edges: usize,
    },

    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A save file is malformed or cannot be interpreted.
    #[error("Corrupt save file {}: {message}", path.display())]
    CorruptFile {
        /// File that failed to parse
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A recovery resolution was requested but no autosave file exists.
    #[error("No pending autosave to recover")]
    NoPendingRecovery,
}

/// Convenience `Result` type alias for skill tree operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether the application can carry on with its previous
    /// in-memory graph after this error.
    ///
    /// File and format errors are recoverable. Identity errors indicate a
    /// caller bug and are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io { .. } => true,
            Error::CorruptFile { .. } => true,
            Error::Serialization(_) => true,
            Error::Config { .. } => true,
            Error::NoPendingRecovery => true,
            Error::UnknownNode { .. } => false,
            Error::DuplicateId { .. } => false,
            Error::IdSpaceExhausted => false,
            Error::InvalidPosition { .. } => true,
            Error::StillConnected { .. } => false,
        }
    }

    /// Creates an unknown-node error.
    pub fn unknown_node(id: NodeId) -> Self {
        Error::UnknownNode { id }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a corrupt-file error.
    pub fn corrupt_file<S: Into<String>>(path: impl AsRef<Path>, message: S) -> Self {
        Error::CorruptFile {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
