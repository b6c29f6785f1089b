//! huffcode: build a Huffman code from symbol probabilities and report on it.
//!
//! # Pipeline
//!
//! ```text
//! args -> Config -> ProbabilityMap -> analyze() -> text / JSON report
//! ```
//!
//! With no arguments a seeded random alphabet and message are generated.

mod config;
mod input_gen;

use clap::Parser;
use config::{Args, Config, OutputFormat};
use huffcode_core::analyze;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over --log when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(args)?;
    if config.print_config {
        config.print();
    }

    let map = config.probability_map()?;
    tracing::info!(symbols = map.len(), "alphabet loaded");

    let report = analyze(&map, config.message.as_deref())?;

    match config.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
