//! Generate command handler: print tickets as JSON lines without a broker.

use anyhow::Context;
use clap::Args;
use std::io::Write;
use ticket_generator::TicketGenerator;

/// Arguments for the `generate` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Number of tickets to print
    #[arg(long, default_value = "10")]
    pub count: u64,

    /// Random seed for deterministic generation (same seed = same tickets)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Write `args.count` ticket records to `out`, one JSON document per line.
pub fn run_generate<W: Write>(args: &GenerateArgs, out: &mut W) -> anyhow::Result<()> {
    let mut generator = match args.seed {
        Some(seed) => TicketGenerator::from_seed(seed),
        None => TicketGenerator::from_entropy(),
    };

    tracing::debug!("Generating {} tickets (seed={:?})", args.count, args.seed);

    for _ in 0..args.count {
        let json = generator
            .generate_ticket()
            .to_record()
            .to_json()
            .context("Failed to encode ticket")?;
        writeln!(out, "{json}").context("Failed to write ticket")?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}
