//! Command-line argument definitions for the Strife CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input file, what to print, where to
//! write it, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Strife declaration parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input ACS file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Lower the tree to plain ACC before printing
    #[arg(long)]
    pub lower: bool,

    /// Also list task items found in comments
    #[arg(long)]
    pub tasks: bool,

    /// Also list function bindings
    #[arg(long)]
    pub bindings: bool,

    /// Path to the output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
