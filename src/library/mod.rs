use std::path::Path;

use crate::{
    error::SourceParseError,
    types::{Bookmark, BrowserFamily},
};

use self::{chromium_library::ChromiumLibrary, firefox_library::FirefoxLibrary};

pub mod chromium_library;
pub mod collection;
pub mod firefox_library;
pub mod locator;

pub trait Library {
    fn get_bookmarks(&self, path: &Path) -> Result<Vec<Bookmark>, SourceParseError>;
}

pub fn library_for(family: BrowserFamily) -> Box<dyn Library> {
    match family {
        BrowserFamily::Firefox => Box::new(FirefoxLibrary {}),
        family => Box::new(ChromiumLibrary { family }),
    }
}
