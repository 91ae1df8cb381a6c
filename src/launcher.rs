use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};
use log::debug;

use crate::{config::config::Config, selector::Selection, types::BrowserFamily};

pub struct Launcher<'a> {
    config: &'a Config,
}

impl<'a> Launcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Launcher { config }
    }

    /// Starts the browser and returns without waiting for it.
    pub fn open(&self, selection: &Selection) -> Result<()> {
        self.open_url(&selection.url, selection.source)
    }

    pub fn open_url(&self, url: &str, browser: Option<BrowserFamily>) -> Result<()> {
        match browser {
            Some(family) => {
                let command = self.config.get_launcher(family);
                debug!("Opening {} with {}", url, command);

                Command::new(&command)
                    .arg(url)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(|e| anyhow!("Cannot start {}: {}", command, e))?;
            }
            None => {
                debug!("Opening {} with default handler", url);

                open::that_detached(url)
                    .map_err(|e| anyhow!("Cannot open {}: {}", url, e))?;
            }
        }

        Ok(())
    }
}
