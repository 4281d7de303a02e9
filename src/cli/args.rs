//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Convert scene collection hierarchies to empty-node hierarchies and back
#[derive(Parser, Debug)]
#[command(name = "groupnode")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (replaces global and local config lookup)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert collections to empties (hierarchy preserved)
    #[command(name = "to-nodes")]
    ToNodes(ConvertArgs),

    /// Convert each root empty and its descendants to a collection
    #[command(name = "to-groups")]
    ToGroups(ConvertArgs),

    /// Show collection and empty hierarchies
    Tree {
        /// Scene file
        #[arg(value_hint = ValueHint::FilePath)]
        scene: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments shared by both conversions
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Scene file (TOML)
    #[arg(value_hint = ValueHint::FilePath)]
    pub scene: PathBuf,

    /// Write the result here instead of replacing the scene file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Convert and report, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the resulting hierarchies
    #[arg(long)]
    pub tree: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show {
        /// Scene file whose directory provides local config
        #[arg(value_hint = ValueHint::FilePath)]
        scene: Option<PathBuf>,
    },

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
