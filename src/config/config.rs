use home_dir::HomeDirExt;
use log::debug;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::BrowserFamily;

use super::app_config::AppConfig;

pub struct Config {
    config_file: PathBuf,
    app_config: AppConfig,
}

impl Config {
    pub fn new_from_file(config_path: Option<String>) -> Result<Config> {
        if let Some(config_path) = config_path {
            let config_file = expand(&config_path)?;

            if !config_file.exists() {
                return Err(anyhow!(
                    "Given config file (\"{}\") doesn't exist",
                    config_file.display()
                ));
            }

            Config::new(config_file)
        } else {
            Config::new_default()
        }
    }

    pub fn new_default() -> Result<Config> {
        let config_directory_root =
            std::env::var("XDG_CONFIG_HOME").unwrap_or("~/.config".to_string());

        let config_file = expand(&config_directory_root)?
            .join("fzbmark")
            .join("config.toml");

        if config_file.exists() {
            Config::new(config_file)
        } else {
            debug!("No config file at \"{}\", using defaults", config_file.display());

            Ok(Config {
                config_file,
                app_config: AppConfig::new_default(),
            })
        }
    }

    fn new(config_file: PathBuf) -> Result<Config> {
        let file_content = std::fs::read_to_string(&config_file)?;
        let app_config: AppConfig = toml::from_str(&file_content).map_err(|e| {
            anyhow!(
                "Cannot parse config file \"{}\": {}",
                config_file.display(),
                e
            )
        })?;

        let config = Config {
            config_file,
            app_config,
        };

        config.validate().and(Ok(config))
    }

    pub fn get_selector(&self) -> &str {
        &self.app_config.selector
    }

    pub fn get_selector_args(&self) -> &[String] {
        &self.app_config.selector_args
    }

    pub fn get_home_dir(&self) -> Result<Option<PathBuf>> {
        self.app_config
            .home_dir
            .as_ref()
            .map(|p| expand(p))
            .transpose()
    }

    /// Executable opening bookmarks of `family`, the family name unless configured.
    pub fn get_launcher(&self, family: BrowserFamily) -> String {
        self.app_config
            .launchers
            .get(family.name())
            .cloned()
            .unwrap_or_else(|| family.name().to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_config.selector.trim().is_empty() {
            return Err(anyhow!(
                "Given selector is empty (config file path: \"{}\")",
                self.config_file.display()
            ));
        }

        if let Some(home_dir) = self.get_home_dir()? {
            if !home_dir.is_dir() {
                return Err(anyhow!(
                    "Given home_dir (\"{}\") doesn't exist (config file path: \"{}\")",
                    home_dir.display(),
                    self.config_file.display()
                ));
            }
        }

        for (family, command) in &self.app_config.launchers {
            if family.parse::<BrowserFamily>().is_err() {
                return Err(anyhow!(
                    "Given launcher \"{}\" is not a supported browser (config file path: \"{}\")",
                    family,
                    self.config_file.display()
                ));
            }

            if command.trim().is_empty() {
                return Err(anyhow!(
                    "Given launcher for \"{}\" is empty (config file path: \"{}\")",
                    family,
                    self.config_file.display()
                ));
            }
        }

        Ok(())
    }
}

fn expand(path: &str) -> Result<PathBuf> {
    PathBuf::from(path)
        .expand_home()
        .map_err(|_| anyhow!("Cannot expand home directory in \"{}\"", path))
}
