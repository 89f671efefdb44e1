//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rixflat_extractor::DocumentParser;

/// Execute the inspect command.
pub async fn execute_inspect(
    args: InspectArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mut extractor = config.batch.extractor.clone();
    if args.strict_current {
        extractor.strict_current = true;
    }
    let parser = DocumentParser::try_new(extractor)?;

    let path = args.file;
    let doc = tokio::task::spawn_blocking(move || parser.parse_file(&path))
        .await
        .map_err(|e| crate::CliError::InvalidInput(format!("parser task failed: {}", e)))??;

    println!("{}", formatter.format_document(&doc)?);
    Ok(())
}
