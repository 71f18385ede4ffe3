//! The `init` command: write an example `autotier.toml`.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::TierlistConfig;
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::core::AutotierError;

#[derive(Args, Debug)]
pub struct InitCommand {
    /// Where to write the configuration
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute(self) -> Result<()> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) && !self.force {
            return Err(AutotierError::FileExists {
                path: self.path.display().to_string(),
            }
            .into());
        }

        TierlistConfig::init_example().save_to(&self.path).await?;

        println!("{} Wrote example configuration to {}", "✓".green(), self.path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Export an item snapshot from your game, then run:");
        println!("    autotier validate --snapshot items.json");
        println!("    autotier generate --snapshot items.json");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("autotier.toml");

        InitCommand {
            path: path.clone(),
            force: false,
        }
        .execute()
        .await
        .unwrap();

        let loaded = TierlistConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, TierlistConfig::init_example());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("autotier.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = InitCommand {
            path: path.clone(),
            force: false,
        }
        .execute()
        .await
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<AutotierError>(), Some(AutotierError::FileExists { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        InitCommand {
            path: path.clone(),
            force: true,
        }
        .execute()
        .await
        .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[layout]"));
    }
}
