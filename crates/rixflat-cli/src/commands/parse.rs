//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, Formatter};
use rixflat_batch::{BatchConfig, BatchRunner};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Execute the parse command.
///
/// Rows go to `--output` as CSV, or to stdout in the selected format. The
/// batch summary and per-file failures go to stderr.
pub async fn execute_parse(args: ParseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let runner = BatchRunner::new(batch_config(&args, &config.batch))?;
    let report = runner.run(&args.dir).await?;

    match &args.output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            output::write_csv(file, &report.rows)?;
            eprintln!(
                "{}",
                formatter.info(&format!("Wrote {} row(s) to {}", report.rows.len(), path.display()))
            );
        }
        None => {
            let rendered = formatter.format_rows(&report.rows)?;
            if !rendered.is_empty() {
                let mut stdout = io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                if !rendered.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
    }

    eprintln!("{}", formatter.batch_summary(&report));
    Ok(())
}

/// Apply command-line overrides on top of the configured batch options.
pub fn batch_config(args: &ParseArgs, base: &BatchConfig) -> BatchConfig {
    let mut config = base.clone();
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    if let Some(workers) = args.workers {
        config.max_workers = workers;
    }
    if args.strict_current {
        config.extractor.strict_current = true;
    }
    config
}
