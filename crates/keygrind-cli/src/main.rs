//! Keygrind CLI - vanity keypair search for base58 addresses.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod commands;
mod config;
mod observability;
mod progress;

use config::Config;
use observability::LogFormat;

/// Keygrind - find ed25519 keypairs with vanity addresses
#[derive(Parser, Debug)]
#[command(name = "keygrind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Configuration file (default: ./keygrind.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for a keypair whose address matches a pattern
    Grind {
        /// Required leading characters (case-sensitive)
        #[arg(long)]
        starts_with: Option<String>,

        /// Required trailing characters (case-sensitive)
        #[arg(long)]
        ends_with: Option<String>,

        /// Give up after this many attempts
        #[arg(long)]
        max_attempts: Option<u64>,

        /// Attempts between progress updates
        #[arg(long)]
        progress_interval: Option<u64>,

        /// Worker threads (default: all cores)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Keypair file path (default: <ADDRESS>.json)
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Do not write a keypair file
        #[arg(long, conflicts_with = "outfile")]
        no_outfile: bool,

        /// Overwrite an existing keypair file
        #[arg(long)]
        force: bool,

        /// Print the base58 private key
        #[arg(long)]
        print_secret: bool,

        /// Seed for a reproducible, insecure key source (runs one worker)
        #[arg(long, hide = true)]
        seed: Option<u64>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate a single keypair
    New {
        /// Keypair file path
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Overwrite an existing keypair file
        #[arg(long)]
        force: bool,

        /// Print the base58 private key
        #[arg(long)]
        print_secret: bool,
    },

    /// Show the address of a keypair file
    Pubkey {
        /// Keypair file
        keyfile: PathBuf,
    },

    /// Check that a keypair file matches an address
    Verify {
        /// Expected base58 address
        address: String,
        /// Keypair file
        keyfile: PathBuf,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate how many attempts a pattern needs
    Estimate {
        /// Required leading characters
        #[arg(long)]
        starts_with: Option<String>,

        /// Required trailing characters
        #[arg(long)]
        ends_with: Option<String>,

        /// Keys per second, for a time estimate
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_path) = match Config::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_level = observability::verbosity_level(cli.verbose).unwrap_or(&config.log_level);
    let log_format = cli.log_format.unwrap_or(config.log_format);
    observability::init_logging(log_level, log_format);

    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::debug!("No config file, using defaults"),
    }

    let result = match cli.command {
        Commands::Grind {
            starts_with,
            ends_with,
            max_attempts,
            progress_interval,
            workers,
            timeout_secs,
            outfile,
            no_outfile,
            force,
            print_secret,
            seed,
            json,
        } => commands::grind(&commands::GrindOptions {
            starts_with,
            ends_with,
            max_attempts,
            progress_interval: progress_interval.unwrap_or(config.progress_interval),
            workers: workers.unwrap_or_else(|| config.resolved_workers()),
            timeout: timeout_secs.or(config.timeout_secs).map(Duration::from_secs),
            outfile,
            output_dir: config.output_dir.clone(),
            no_outfile,
            force,
            print_secret,
            seed,
            show_spinner: cli.verbose == 0
                && log_format == LogFormat::Pretty
                && std::io::stderr().is_terminal(),
            json,
        }),
        Commands::New {
            outfile,
            force,
            print_secret,
        } => commands::new_keypair(outfile.as_deref(), force, print_secret),
        Commands::Pubkey { keyfile } => commands::pubkey(&keyfile),
        Commands::Verify {
            address,
            keyfile,
            json,
        } => commands::verify(&address, &keyfile, json),
        Commands::Estimate {
            starts_with,
            ends_with,
            rate,
        } => commands::estimate(starts_with.as_deref(), ends_with.as_deref(), rate),
        Commands::Version => {
            println!("keygrind {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
