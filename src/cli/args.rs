use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "abapscan", version, about = "Finds ABAP usages affected by SAP Note 2198647")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Path to the configuration file (default: ./abapscan.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a JSON array of units read from a file or stdin
    Scan {
        /// Input file; omit or pass `-` to read stdin
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Print findings as JSON instead of the console report
        #[arg(long)]
        json: bool,
    },
    /// Show the active pattern catalog
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Write a default abapscan.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}
