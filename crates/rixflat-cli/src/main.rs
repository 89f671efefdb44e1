//! Rixflat CLI - flatten directories of RIXML research documents.

use clap::Parser;
use rixflat_cli::commands;
use rixflat_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> rixflat_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &config, &formatter).await?,
        Command::Inspect(args) => commands::execute_inspect(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter).await?
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for row output.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
