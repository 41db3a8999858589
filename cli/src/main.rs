//! hex2file CLI - convert hex text files into raw binary files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hex2file_core::prelude::*;

#[derive(Parser)]
#[command(name = "hex2file")]
#[command(author, version)]
#[command(arg_required_else_help = true)]
/// Convert a hex text file into its raw bytes.
///
/// Useful for rebuilding installers, asset files and other large byte
/// sequences that were shipped as hex. Press Tab + Esc (then Enter) to stop
/// an in-progress conversion.
struct Cli {
    /// Path to the input hex (.hex or .txt) file
    #[arg(short = 'i', long = "input-hex", visible_alias = "inputHex", value_name = "PATH")]
    input: PathBuf,

    /// Path to the output file where raw data will be written
    #[arg(short = 'o', long = "output-file", visible_alias = "outputFile", value_name = "PATH")]
    output: PathBuf,

    /// Enable debug mode for detailed output
    #[arg(short, long)]
    debug: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// JSON session config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hex characters per decode chunk (even)
    #[arg(long, value_name = "HEX_CHARS")]
    chunk_size: Option<usize>,

    /// Decode workers per chunk (defaults to CPU count)
    #[arg(long)]
    workers: Option<usize>,

    /// Do not watch stdin for the Tab + Esc cancel gesture
    #[arg(long)]
    no_keys: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn filter(&self) -> &'static str {
        match (self.debug, self.verbose) {
            (_, 3..) => "trace",
            (true, _) | (_, 2) => "debug",
            (_, 1) => "info",
            _ => "warn",
        }
    }

    fn session_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ConvertConfig::default(),
        };

        if let Some(chunk) = self.chunk_size {
            config.chunk_size_hex = chunk;
        }
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        if self.debug {
            config.verbosity = Verbosity::Debug;
        } else if self.quiet {
            config.verbosity = Verbosity::Quiet;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.session_config()?;
    tracing::debug!("Input Path: {}", cli.input.display());
    tracing::debug!("Output Path: {}", cli.output.display());

    let cancel: Box<dyn CancelSource> = if cli.no_keys {
        Box::new(NeverCancel)
    } else {
        Box::new(KeyGestureWatcher::stdin())
    };
    let progress: Box<dyn ProgressSink> = if config.verbosity.is_quiet() {
        Box::new(NullProgress)
    } else {
        Box::new(ConsoleProgress::stdout().with_widths(config.status_width, config.bar_width))
    };

    match convert_file(&cli.input, &cli.output, config, cancel, progress) {
        Ok(outcome) => {
            if cli.json {
                println!("{}", outcome.report().to_json()?);
            }
            Ok(if outcome.is_completed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Err(e) => {
            eprintln!("\n[ERROR]: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
