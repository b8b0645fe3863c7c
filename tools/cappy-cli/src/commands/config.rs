//! Configuration file management.

use cappy_common::config::{config_file_path, AppConfig};

use crate::ConfigAction;

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = config_file_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            let written = AppConfig::default()
                .save()
                .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
            println!("Wrote default config to {}", written.display());
        }
        ConfigAction::Show => {
            let config = AppConfig::load();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", config_file_path().display());
        }
    }
    Ok(())
}
