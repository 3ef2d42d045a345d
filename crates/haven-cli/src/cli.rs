use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use haven_assessment::ScoringEngine;
use tracing::warn;

use crate::commands;
use crate::config::{self, HavenConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "haven",
    about = "Match self-report answers to recommended therapy focus areas",
    version
)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the questionnaire sections and questions
    Catalog,
    /// Print the therapy areas that can be recommended
    Areas,
    /// Score a JSON file of answers keyed by question id
    Score(ScoreArgs),
    /// Answer the questionnaire interactively
    Take(TakeArgs),
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to a JSON object of `question id -> answer`
    pub answers: PathBuf,
    /// Also show which answers and rules produced each score
    #[arg(long)]
    pub explain: bool,
    /// Override the configured output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct TakeArgs {
    /// Override the configured output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file lives
    Path,
}

/// Dispatch `command`. `config` is the outcome of loading the config file;
/// only commands that depend on it fail when it could not be read, so
/// `config init --force` and `config path` still work on a broken file.
pub fn run(
    command: Command,
    config: eyre::Result<HavenConfig>,
    config_path: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match command {
        Command::Catalog => commands::print_catalog(out),
        Command::Areas => commands::print_areas(out),
        Command::Score(args) => {
            let config = config?;
            let engine = engine_for(&config)?;
            let format = args.format.unwrap_or(config.output);
            commands::score_file(&engine, &args.answers, args.explain, format, out)
        }
        Command::Take(args) => {
            let config = config?;
            let engine = engine_for(&config)?;
            let format = args.format.unwrap_or(config.output);
            commands::take(engine, format, input, out)
        }
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                writeln!(out, "{}", serde_json::to_string_pretty(&config?)?)?;
                Ok(())
            }
            ConfigCommand::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                if let Err(e) = &config {
                    warn!(path = %config_path.display(), error = %e, "replacing unreadable config");
                }
                config::save_config(config_path, &HavenConfig::default())?;
                writeln!(out, "wrote {}", config_path.display())?;
                Ok(())
            }
            ConfigCommand::Path => {
                writeln!(out, "{}", config_path.display())?;
                Ok(())
            }
        },
    }
}

fn engine_for(config: &HavenConfig) -> eyre::Result<ScoringEngine> {
    Ok(ScoringEngine::standard().with_top_n(config.top_n)?)
}
