//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use skilltree_core::{NodeId, UpgradeType};

/// Skill tree designer: inspect and edit skill tree files
#[derive(Parser, Debug)]
#[command(name = "skilltree", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Skill tree file (overrides `save_path` from the config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every node with its connections
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check the save file for dangling references, duplicates, and cycles
    Validate,

    /// Add a skill node
    Add {
        /// Horizontal position
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        /// Vertical position
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        /// Skill name (defaults to "Node <id>")
        #[arg(long)]
        name: Option<String>,
        /// Skill description
        #[arg(long)]
        description: Option<String>,
        /// Upgrade type (weapon_unlock, class_unlock, active_ability, passive_ability)
        #[arg(long = "type")]
        upgrade_type: Option<UpgradeType>,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Make one node a prerequisite of another
    Link {
        /// The prerequisite
        #[arg(long)]
        prereq: NodeId,
        /// The node that depends on it
        #[arg(long)]
        node: NodeId,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Remove the connection between two nodes, in whichever direction it runs
    Unlink {
        /// First node
        a: NodeId,
        /// Second node
        b: NodeId,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Delete a node and all of its connections
    Delete {
        /// Node to delete
        id: NodeId,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Change a node's name, description, or type
    Rename {
        /// Node to edit
        id: NodeId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New upgrade type
        #[arg(long = "type")]
        upgrade_type: Option<UpgradeType>,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Renumber the graph and write the save file
    Save,

    /// Inspect or resolve unsaved changes left in the autosave file
    Recover {
        #[command(subcommand)]
        action: RecoverAction,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by editing commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct SaveArgs {
    /// Leave the change in the autosave file instead of saving
    #[arg(long)]
    pub no_save: bool,
}

/// `recover` subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum RecoverAction {
    /// Report whether an autosave is pending
    Status,
    /// Promote the autosave to the save file
    Commit,
    /// Delete the autosave
    Discard,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key
    Get {
        /// Key, e.g. `grid_size`
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Key, e.g. `autosave`
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
