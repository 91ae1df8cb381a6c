use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub(super) selector: String,
    pub(super) selector_args: Vec<String>,
    pub(super) home_dir: Option<String>,
    /// Browser family name to the executable used to open its bookmarks.
    pub(super) launchers: HashMap<String, String>,
}

impl AppConfig {
    pub fn new_default() -> AppConfig {
        AppConfig {
            selector: "fzf".to_string(),
            selector_args: [
                "--delimiter",
                "|",
                "--with-nth",
                "1,3",
                "--preview",
                "echo {2} | cut -c1-80",
                "--preview-window",
                "down:1:wrap",
            ]
            .iter()
            .map(|a| a.to_string())
            .collect(),
            home_dir: None,
            launchers: HashMap::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::new_default()
    }
}
