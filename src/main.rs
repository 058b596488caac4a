//! Command-line interface for pos-ticket-producer
//!
//! # Usage Examples
//!
//! ```bash
//! # Publish tickets to the default broker and topic
//! pos-ticket-producer run
//!
//! # Configure through the environment
//! KAFKA_BROKERS=localhost:9092 TICKET_BATCH_SIZE=5 pos-ticket-producer run
//!
//! # Inspect the wire format
//! pos-ticket-producer generate --count 3 --seed 42
//! ```

use clap::{Parser, Subcommand};
use pos_ticket_producer::commands::{run_generate, run_publish, GenerateArgs};
use ticket_publisher::RunArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pos-ticket-producer")]
#[command(about = "Publish synthetic point-of-sale tickets to Kafka in batches")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the broker and publish tickets until stopped
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print tickets as JSON lines to stdout
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => {
            run_publish(args).await?;
        }
        Commands::Generate { args } => {
            let stdout = std::io::stdout();
            run_generate(&args, &mut stdout.lock())?;
        }
    }

    Ok(())
}
