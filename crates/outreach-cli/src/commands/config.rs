//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, path, formatter),
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Print the effective configuration.
fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Quiet => println!("{}", path.display()),
        OutputFormat::Table => {
            println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
            println!();
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} already exists; use --force to overwrite",
                path.display()
            ))
        );
        return Ok(());
    }

    Config::default().save(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ncolor = false\n").unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        init_config(&path, false, &formatter).unwrap();
        assert!(!Config::load(&path).unwrap().settings.color);

        init_config(&path, true, &formatter).unwrap();
        assert!(Config::load(&path).unwrap().settings.color);
    }
}
