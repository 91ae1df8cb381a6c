use std::{io, path::PathBuf};

use crate::types::BrowserFamily;

#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    #[error("Cannot resolve home directory for {family} profiles")]
    NoHome { family: BrowserFamily },

    #[error("Cannot read {family} profiles in \"{}\": {source}", .path.display())]
    Unreadable {
        family: BrowserFamily,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a single bookmark store. Never escapes the source it came from.
#[derive(thiserror::Error, Debug)]
pub enum SourceParseError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot read file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed bookmarks file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum SelectionError {
    #[error("{0} not found")]
    SelectorNotFound(String),

    #[error("Invalid selection")]
    InvalidSelection,

    #[error(transparent)]
    Io(#[from] io::Error),
}
