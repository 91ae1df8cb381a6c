use std::{fmt, str::FromStr};

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BrowserFamily {
    Firefox,
    Chrome,
    Chromium,
    Brave,
}

impl BrowserFamily {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserFamily::Firefox => "firefox",
            BrowserFamily::Chrome => "chrome",
            BrowserFamily::Chromium => "chromium",
            BrowserFamily::Brave => "brave",
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrowserFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firefox" => Ok(BrowserFamily::Firefox),
            "chrome" => Ok(BrowserFamily::Chrome),
            "chromium" => Ok(BrowserFamily::Chromium),
            "brave" => Ok(BrowserFamily::Brave),
            other => Err(format!("Unknown browser: {}", other)),
        }
    }
}

/// A bookmark from any browser. `title` falls back to `url`, so neither is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
    pub source: BrowserFamily,
}

impl Bookmark {
    pub fn new(url: String, title: Option<String>, source: BrowserFamily) -> Self {
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.clone());

        Bookmark { title, url, source }
    }
}

/// Bookmark stores found for one browser family, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserProfiles {
    pub family: BrowserFamily,
    pub paths: Vec<std::path::PathBuf>,
}
