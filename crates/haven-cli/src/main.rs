use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use haven_cli::cli::{self, Cli};
use haven_cli::config::{self, ConfigSource, LogFormat};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    // A broken file is only fatal for commands that read it; see `cli::run`.
    let loaded = config::load_or_default(&config_path);
    let log_format = loaded
        .as_ref()
        .map(|(config, _)| config.log_format)
        .unwrap_or_default();

    // Logs go to stderr so JSON results on stdout stay machine-readable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    match log_format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    if let Ok((_, ConfigSource::Migrated { from })) = &loaded {
        tracing::info!(path = %config_path.display(), from, "migrated config to current version");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    cli::run(
        args.command,
        loaded.map(|(config, _)| config),
        &config_path,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}
