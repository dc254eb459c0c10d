use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keel: a host scaffold assembled from statically registered extensions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover extensions, drive every lifecycle phase, and print the
    /// resulting host summary
    Run {
        /// Path to a TOML or JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List discovered host modules and themes
    Extensions {
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the lifecycle phases in execution order
    Phases,
    /// Liveness check
    Ping,
}
