//! CLI command definitions and handlers

mod batch;
mod check;
mod guess;
mod init;
mod share;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ngender::{Classifier, Mode, NGenderConfig};
use std::path::{Path, PathBuf};

/// ngender - guess the gender of a Chinese name
///
/// Naive Bayes over per-character frequencies. For fun only.
#[derive(Parser, Debug)]
#[command(name = "ngender")]
#[command(
    version,
    about = "Guess the likely gender of a Chinese personal name",
    after_help = "\
Examples:
  ngender guess 王伟                     Classify one name
  ngender guess 王伟 --mode reverse      Inverted confidence, flipped label
  ngender guess 王伟 --format json       JSON envelope for scripting
  ngender guess --share @宋丹丹           Classify a share token
  ngender batch --input names.txt        One JSON line per name
  ngender check                          Validate the configured data files"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./ngender.toml, then ~/.config/ngender/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Guess the gender of one name
    Guess {
        /// Name to classify (2-4 Chinese characters unless --nolimit)
        #[arg(required_unless_present = "share")]
        name: Option<String>,

        /// Mode: normal, reverse, opposite (or 0, 1, 2)
        #[arg(long, short = 'm', default_value = "normal")]
        mode: Mode,

        /// Accept names of any length
        #[arg(long)]
        nolimit: bool,

        /// Output format: text, json (default from config, else text)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Classify a share token instead (#name = reverse, @name = opposite)
        #[arg(long, conflicts_with = "name")]
        share: Option<String>,
    },

    /// Print a share token for a name
    Share {
        name: String,

        /// Mode: normal, reverse, opposite (or 0, 1, 2)
        #[arg(long, short = 'm', default_value = "normal")]
        mode: Mode,
    },

    /// Classify one name per line from a file or stdin, emitting JSON lines
    Batch {
        /// Input file (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Mode: normal, reverse, opposite (or 0, 1, 2)
        #[arg(long, short = 'm', default_value = "normal")]
        mode: Mode,

        /// Accept names of any length
        #[arg(long)]
        nolimit: bool,
    },

    /// Validate the configured frequency table and caption bank
    Check,

    /// Write an example config file
    Init {
        /// Destination (default: ~/.config/ngender/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => init::run(path.as_deref()),

        Commands::Share { name, mode } => share::run(&name, mode),

        Commands::Check => check::run(&load_config(cli.config.as_deref())?),

        Commands::Guess {
            name,
            mode,
            nolimit,
            format,
            share,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let classifier = load_classifier(&config)?;
            let format = format.unwrap_or_else(|| config.output_format().to_string());
            let ok = guess::run(
                &classifier,
                name.as_deref(),
                share.as_deref(),
                mode,
                nolimit || config.nolimit(),
                &format,
            )?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Batch {
            input,
            mode,
            nolimit,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let classifier = load_classifier(&config)?;
            batch::run(&classifier, input.as_deref(), mode, nolimit || config.nolimit())
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<NGenderConfig> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    NGenderConfig::load(&cwd, explicit)
}

/// Reference data problems are fatal: nothing is classified with a bad table
fn load_classifier(config: &NGenderConfig) -> Result<Classifier> {
    config
        .build_classifier()
        .context("Failed to load reference data")
}
