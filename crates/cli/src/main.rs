//! Wayfarer CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Write the default config file
//! - `agent`    — Run one reason-then-act loop for a question
//! - `gateway`  — Start the HTTP server
//! - `status`   — Show effective configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer — a reason-then-act travel assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Onboard,

    /// Ask the agent a single question
    Agent {
        /// The question to answer
        #[arg(short, long)]
        message: String,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Agent { message } => commands::agent::run(message).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
