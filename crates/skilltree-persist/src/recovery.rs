//! Unsaved-change detection and resolution.
//!
//! An autosave file that outlives its session means the previous run ended
//! with changes that never reached the primary file. At startup the caller
//! asks [`PersistenceEngine::pending_recovery`](crate::PersistenceEngine::pending_recovery)
//! and, if something is pending, picks a [`Resolution`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::SystemTime;

use skilltree_core::Error;

/// A leftover autosave found at startup.
#[derive(Debug, Clone)]
pub struct RecoveryInfo {
    /// The autosave file holding the unsaved changes.
    pub autosave_path: PathBuf,
    /// The primary file the changes belong to.
    pub primary_path: PathBuf,
    /// Whether a primary file exists at all.
    pub primary_exists: bool,
    /// When the autosave was last written, if the platform reports it.
    pub modified: Option<SystemTime>,
}

/// What to do with a pending autosave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Promote the autosave to the primary file.
    Commit,
    /// Throw the autosave away.
    Discard,
    /// Leave everything as it is and decide later.
    Abort,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Commit => "commit",
            Self::Discard => "discard",
            Self::Abort => "abort",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(Self::Commit),
            "discard" => Ok(Self::Discard),
            "abort" => Ok(Self::Abort),
            other => Err(Error::config(format!(
                "unknown recovery resolution '{other}' (expected commit, discard, or abort)"
            ))),
        }
    }
}

/// The answer to "save changes before closing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    /// Write the changes to the primary file.
    Save,
    /// Drop the changes.
    Discard,
    /// Keep the session open.
    Cancel,
}

impl From<UnsavedChoice> for Resolution {
    fn from(choice: UnsavedChoice) -> Self {
        match choice {
            UnsavedChoice::Save => Self::Commit,
            UnsavedChoice::Discard => Self::Discard,
            UnsavedChoice::Cancel => Self::Abort,
        }
    }
}

/// What a resolution actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The autosave became the primary file.
    Committed,
    /// The autosave was deleted.
    Discarded,
    /// Nothing changed.
    Aborted,
}
