//! Boardsync CLI entry point.

use clap::Parser;

use boardsync::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve => boardsync::cli::commands::serve::execute(cli.config.as_deref()).await,
        Commands::Replay { event, payload } => {
            boardsync::cli::commands::replay::execute(&event, &payload, cli.config.as_deref())
                .await
        }
    };

    if let Err(err) = result {
        boardsync::cli::handle_error(err);
    }
}
