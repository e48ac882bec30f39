//! VoiceForge CLI - document store migrations and CMS seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create the documents table (idempotent)
//! voiceforge-cli migrate
//!
//! # Fill empty CMS collections with the default content
//! voiceforge-cli seed
//! ```
//!
//! Both commands read `VOICEFORGE_DATABASE_URL` (or `DATABASE_URL`) and
//! `DATABASE_NAME` from the environment or a `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "voiceforge-cli")]
#[command(author, version, about = "VoiceForge backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run document store migrations
    Migrate,
    /// Seed empty CMS collections with default content
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
