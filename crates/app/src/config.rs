//! Configuration for the huffcode application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: without an explicit alphabet it
//! generates one from a seed, and `--print-config` shows that seed so the run
//! can be repeated.

use crate::input_gen::generate_sample;
use clap::{Parser, ValueEnum};
use huffcode_core::{Error, ProbabilityMap, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt::Write as _;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "huffcode")]
#[command(about = "Build a Huffman code from symbol probabilities and report on it")]
pub struct Args {
    /// Comma-separated symbols, e.g. "a,b,c"
    #[arg(long)]
    pub symbols: Option<String>,

    /// Comma-separated probabilities, e.g. "0.5,0.25,0.25"
    #[arg(long)]
    pub probabilities: Option<String>,

    /// Message to encode and decode
    #[arg(long)]
    pub message: Option<String>,

    /// Random seed for generated input
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of symbols to generate (default: random 3-12)
    #[arg(long)]
    pub alphabet_size: Option<usize>,

    /// Length of the generated message
    #[arg(long)]
    pub message_len: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// tracing filter directive
    #[arg(long, default_value = "warn")]
    pub log: String,
}

/// Where the alphabet came from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    CommandLine,
    Generated { seed: u64, alphabet_size: usize },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    pub source: InputSource,

    /// Comma-separated symbols
    pub symbols: String,

    /// Comma-separated probabilities
    pub probabilities: String,

    /// Message to round-trip (None = alphabet only)
    pub message: Option<String>,

    // === Behavior ===
    pub format: OutputFormat,

    /// Whether to print detailed config
    pub print_config: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// With neither `--symbols` nor `--probabilities`, an alphabet and message
    /// are generated. The seed is `--seed` if given, otherwise time-based.
    ///
    /// # Errors
    /// `Error::Config` if only one of `--symbols`/`--probabilities` is given,
    /// if generator options are combined with an explicit alphabet, or if
    /// `--alphabet-size` is out of range for the generator.
    pub fn from_args(args: Args) -> Result<Self> {
        let source;
        let symbols;
        let probabilities;
        let mut message = args.message;

        match (args.symbols, args.probabilities) {
            (Some(s), Some(p)) => {
                if args.seed.is_some() || args.alphabet_size.is_some() || args.message_len.is_some()
                {
                    return Err(Error::Config(
                        "--seed, --alphabet-size and --message-len only apply to generated input"
                            .to_string(),
                    ));
                }
                source = InputSource::CommandLine;
                symbols = s;
                probabilities = p;
            }
            (None, None) => {
                // Determine seed (explicit or time-based)
                let seed = args.seed.unwrap_or_else(|| {
                    use std::time::{SystemTime, UNIX_EPOCH};
                    SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map(|d| d.as_millis() as u64)
                        .unwrap_or_default()
                });

                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let alphabet_size = args.alphabet_size.unwrap_or_else(|| rng.gen_range(3..=12));
                let message_len = args.message_len.unwrap_or(24);

                let sample = generate_sample(seed, alphabet_size, message_len)?;
                tracing::info!(seed, alphabet_size, "generated sample alphabet");

                source = InputSource::Generated {
                    seed,
                    alphabet_size,
                };
                symbols = sample.symbols;
                probabilities = sample.probabilities;
                if message.is_none() {
                    message = Some(sample.message);
                }
            }
            (Some(_), None) => {
                return Err(Error::Config("--symbols requires --probabilities".to_string()));
            }
            (None, Some(_)) => {
                return Err(Error::Config("--probabilities requires --symbols".to_string()));
            }
        }

        Ok(Config {
            source,
            symbols,
            probabilities,
            message,
            format: args.format,
            print_config: args.print_config,
        })
    }

    /// Parse and validate the configured alphabet.
    pub fn probability_map(&self) -> Result<ProbabilityMap> {
        ProbabilityMap::parse_lists(&self.symbols, &self.probabilities)
    }

    /// Human-readable form of the configuration.
    pub fn render(&self) -> String {
        let mut out = String::from("=== Configuration ===\n");
        match &self.source {
            InputSource::CommandLine => out.push_str("Input: command line\n"),
            InputSource::Generated {
                seed,
                alphabet_size,
            } => {
                let _ = writeln!(out, "Input: generated");
                let _ = writeln!(out, "Seed: {}", seed);
                let _ = writeln!(out, "Alphabet size: {}", alphabet_size);
            }
        }
        let _ = writeln!(out, "Symbols: {}", self.symbols);
        let _ = writeln!(out, "Probabilities: {}", self.probabilities);
        let _ = writeln!(out, "Message: {}", self.message.as_deref().unwrap_or("(none)"));
        let _ = writeln!(out, "Format: {:?}", self.format);
        out
    }

    /// Print the configuration to stderr, keeping stdout for the report.
    pub fn print(&self) {
        eprintln!("{}", self.render());
    }
}
