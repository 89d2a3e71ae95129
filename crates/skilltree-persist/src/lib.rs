//! Skill tree persistence.
//!
//! # Modules
//!
//! - [`schema`]: On-disk JSON layout
//! - [`engine`]: Save, load, autosave, and backup
//! - [`recovery`]: Unsaved-change detection and resolution

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod recovery;
pub mod schema;

pub use engine::{LoadReport, PersistenceEngine, SaveReport};
pub use recovery::{RecoveryInfo, RecoveryOutcome, Resolution, UnsavedChoice};
pub use schema::{NodeRecord, SaveFile};
