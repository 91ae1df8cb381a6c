use std::fs;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::SourceParseError,
    types::{Bookmark, BrowserFamily},
};

use super::Library;

/// Reads the `Bookmarks` JSON tree shared by every Chromium based browser.
pub struct ChromiumLibrary {
    pub family: BrowserFamily,
}

impl Library for ChromiumLibrary {
    fn get_bookmarks(&self, path: &std::path::Path) -> Result<Vec<Bookmark>, SourceParseError> {
        let data = fs::read_to_string(path)?;
        let core = read_core(&data)?;

        Ok(collect_bookmarks(core, self.family))
    }
}

// Folder nesting is unbounded in the file format, so parsing grows the stack
// on the heap instead of stopping at serde_json's recursion limit.
fn read_core(data: &str) -> Result<ChromiumBookmarkCore, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(data);
    deserializer.disable_recursion_limit();

    let core = ChromiumBookmarkCore::deserialize(serde_stacker::Deserializer::new(
        &mut deserializer,
    ))?;
    deserializer.end()?;

    Ok(core)
}

fn collect_bookmarks(core: ChromiumBookmarkCore, family: BrowserFamily) -> Vec<Bookmark> {
    let mut bookmarks = vec![];

    for (_, root) in core.roots {
        if root.is_object() {
            parse_bookmarks(root, family, &mut bookmarks);
        }
    }

    bookmarks
}

// Depth first over an explicit stack. Children are moved out before a node is
// dropped, so neither the walk nor the drop recurses.
fn parse_bookmarks(root: Value, family: BrowserFamily, out: &mut Vec<Bookmark>) {
    let mut pending = vec![root];

    while let Some(entry) = pending.pop() {
        let Value::Object(mut entry) = entry else {
            continue;
        };

        if let Some(children) = entry.remove("children") {
            if let Value::Array(children) = children {
                pending.extend(children.into_iter().rev());
            }
            continue;
        }

        if entry.get("type").and_then(Value::as_str) != Some("url") {
            continue;
        }

        let url = match entry.remove("url") {
            Some(Value::String(url)) if !url.is_empty() => url,
            _ => continue,
        };

        let name = match entry.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };

        out.push(Bookmark::new(url, name, family));
    }
}

#[derive(Deserialize)]
struct ChromiumBookmarkCore {
    #[serde(default)]
    roots: Map<String, Value>,
}
