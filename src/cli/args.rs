//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Export pathway class hierarchies as XML and pathway networks as XGMML
#[derive(Parser, Debug)]
#[command(name = "pathierarchy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Pathway catalog file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Directory holding a local .pathierarchy.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the pathway hierarchy of an organism as XML
    Xml {
        /// Organism name
        organism: String,
        /// Include genes under each pathway
        #[arg(long)]
        genes: bool,
        /// Include RNAs under each pathway
        #[arg(long)]
        rna: bool,
        /// Include classes without pathways
        #[arg(long)]
        empty_classes: bool,
        /// Maximum classification depth
        #[arg(long)]
        max_depth: Option<usize>,
        /// Output directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Export pathway networks as XGMML, one file per pathway
    Xgmml {
        /// Organism name
        organism: String,
        /// Pathway names (default: all pathways of the organism)
        pathways: Vec<String>,
        /// Output directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output: Option<PathBuf>,
    },

    /// Show the pathway hierarchy as tree
    Tree {
        /// Organism name
        organism: String,
        /// Include classes without pathways
        #[arg(long)]
        empty_classes: bool,
    },

    /// List organisms in the catalog
    Organisms,

    /// List pathways of an organism
    Pathways {
        /// Organism name
        organism: String,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
