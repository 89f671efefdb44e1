//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `explicit` is the `--config` path, when one was given.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    explicit: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };

    match args.action {
        ConfigAction::Show => show_config(config, &path, formatter),
        ConfigAction::Init { force } => init_config(&path, force, formatter),
    }
}

/// Print the effective configuration.
fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    let origin = if path.exists() {
        format!("Loaded from {}", path.display())
    } else {
        format!("Defaults ({} not found)", path.display())
    };
    println!("{}", formatter.info(&origin));
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)?;
    println!("{}", formatter.success(&format!("Wrote {}", path.display())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let init = |force| ConfigArgs {
            action: ConfigAction::Init { force },
        };
        execute_config(init(false), &Config::default(), Some(&path), &formatter)
            .await
            .unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let again = execute_config(init(false), &Config::default(), Some(&path), &formatter).await;
        assert!(matches!(again, Err(CliError::InvalidInput(_))));

        execute_config(init(true), &Config::default(), Some(&path), &formatter)
            .await
            .unwrap();
    }
}
