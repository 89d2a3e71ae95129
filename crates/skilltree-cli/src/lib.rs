//! Command-line tools for skill tree files.
//!
//! # Modules
//!
//! - [`cli`]: Argument definitions
//! - [`commands`]: Graph, save, and recovery command handlers
//! - [`config`]: TOML configuration
//! - [`config_handlers`]: `config` subcommands
//! - [`error`]: Error type
//! - [`logging`]: Subscriber setup

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::SkillTreeConfig;
pub use error::{Error, Result};

/// Loads configuration and runs the parsed command.
///
/// `--file` replaces the configured save path for this run.
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let mut config = SkillTreeConfig::load(config_path)?;
    if let Some(file) = cli.file {
        config.save_path = file;
    }
    log::debug!("Using save file {}", config.save_path.display());
    commands::run(cli.command, &config, config_path)
}
