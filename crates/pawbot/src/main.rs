// SPDX-FileCopyrightText: 2026 Pawbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pawbot - a Telegram bot for adoptable-pet and help-request listings.
//!
//! This is the binary entry point for the bot.

use clap::{Parser, Subcommand};

mod serve;

/// Pawbot - a Telegram bot for adoptable-pet and help-request listings.
#[derive(Parser, Debug)]
#[command(name = "pawbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot and poll Telegram for updates.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match pawbot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pawbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("pawbot: use --help for available commands");
        }
    }
}
