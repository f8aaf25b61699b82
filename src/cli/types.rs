//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI
//! interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "boardsync")]
#[command(about = "Mirror GitHub Project board status into Azure Boards", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a configuration file (defaults to .boardsync/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook listener
    Serve,

    /// Feed a saved webhook payload through the reconciliation core once
    Replay {
        /// Event name, as GitHub sends it in X-GitHub-Event
        #[arg(short, long)]
        event: String,

        /// Path to the JSON payload file
        payload: PathBuf,
    },
}
