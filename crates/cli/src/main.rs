//! NVM write-engine trace replay CLI.
//!
//! This binary drives the engine from recorded write traces. It provides:
//! 1. **Replay:** Feed a JSON-lines trace through the engine and print statistics.
//! 2. **Config:** Print the effective configuration (defaults, file and overrides merged).
//!
//! A trace holds one write per line: `{"new": [64 bytes], "old": [64 bytes]}`,
//! where `old` is the data stored at the address before the write.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use nvwrite_core::common::constants::BLOCK_SIZE;
use nvwrite_core::{CompressionMode, ConfigError, EngineConfig, WriteEngine, WriteRequest, WriteStats};

#[derive(Parser, Debug)]
#[command(
    name = "nvwrite",
    author,
    version,
    about = "Adaptive compression and write-minimization engine for NVM",
    long_about = "Replay memory write traces through the NVM write engine.\n\nExamples:\n  nvwrite replay trace.jsonl --mode dfpc --training-horizon 100000\n  nvwrite replay trace.jsonl --config engine.json --sections compression,wear\n  nvwrite config --mode fpc --encode"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand.
#[derive(clap::Args, Debug, Default)]
struct ConfigArgs {
    /// JSON configuration file; missing sections keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compression mode (none, fpc, bdi, dfpc).
    #[arg(long, value_parser = parse_mode)]
    mode: Option<CompressionMode>,

    /// Writes observed before the learned table is built.
    #[arg(long)]
    training_horizon: Option<u64>,

    /// Apply the ternary remap after compression.
    #[arg(long)]
    encode: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines write trace and print statistics.
    Replay {
        /// Trace file (one write per line).
        trace: PathBuf,

        #[command(flatten)]
        settings: ConfigArgs,

        /// Statistics sections to print (summary, compression, wear). Default: all.
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },

    /// Print the effective configuration as JSON.
    Config {
        #[command(flatten)]
        settings: ConfigArgs,
    },
}

/// Failures surfaced to the user.
#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("trace line {line}: {source}")]
    Record { line: usize, source: serde_json::Error },

    #[error("trace line {line}: `{field}` holds {len} bytes, expected 64")]
    BlockLength {
        line: usize,
        field: &'static str,
        len: usize,
    },
}

/// One line of a write trace.
#[derive(Debug, Deserialize)]
struct TraceRecord {
    new: Vec<u8>,
    old: Vec<u8>,
}

impl TraceRecord {
    fn into_request(self, line: usize) -> Result<WriteRequest, CliError> {
        Ok(WriteRequest::new(
            block(self.new, "new", line)?,
            block(self.old, "old", line)?,
        ))
    }
}

fn block(bytes: Vec<u8>, field: &'static str, line: usize) -> Result<[u8; BLOCK_SIZE], CliError> {
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CliError::BlockLength { line, field, len })
}

fn parse_mode(name: &str) -> Result<CompressionMode, String> {
    match name.to_ascii_lowercase().as_str() {
        "none" => Ok(CompressionMode::None),
        "fpc" => Ok(CompressionMode::Fpc),
        "bdi" => Ok(CompressionMode::Bdi),
        "dfpc" | "dynamic" => Ok(CompressionMode::Dfpc),
        _ => Err(format!("unknown compression mode `{name}`")),
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Merges defaults, the optional config file and command-line overrides.
fn load_config(args: &ConfigArgs) -> Result<EngineConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json(&read_file(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.compression.mode = mode;
    }
    if let Some(horizon) = args.training_horizon {
        config.learner.training_horizon = horizon;
    }
    if args.encode {
        config.compression.encode = true;
    }
    config.validate()?;
    Ok(config)
}

/// Feeds every record of `reader` through `engine`.
///
/// Blank lines are skipped; line numbers in errors are 1-based.
fn replay(engine: &mut WriteEngine, reader: impl BufRead) -> Result<(), CliError> {
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| CliError::Io {
            path: PathBuf::from(format!("<trace line {number}>")),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(&line)
            .map_err(|source| CliError::Record { line: number, source })?;
        let mut request = record.into_request(number)?;
        let outcome = engine.process_write(&mut request);
        tracing::debug!(line = number, ?outcome, "write");
    }
    Ok(())
}

fn cmd_replay(trace: &Path, settings: &ConfigArgs) -> Result<WriteStats, CliError> {
    let config = load_config(settings)?;
    tracing::info!(mode = ?config.compression.mode, trace = %trace.display(), "replay");

    let file = fs::File::open(trace).map_err(|source| CliError::Io {
        path: trace.to_path_buf(),
        source,
    })?;
    let mut engine = WriteEngine::new(config)?;
    replay(&mut engine, BufReader::new(file))?;
    Ok(engine.stats().clone())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Replay {
            trace,
            settings,
            sections,
        } => {
            let stats = cmd_replay(&trace, &settings)?;
            stats.print_sections(&sections);
        }
        Commands::Config { settings } => {
            let config = load_config(&settings)?;
            let json = serde_json::to_string_pretty(&config).map_err(ConfigError::Json)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
