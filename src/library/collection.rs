use log::{info, warn};

use crate::types::{Bookmark, BrowserFamily, BrowserProfiles};

use super::{library_for, Library};

/// Reads every discovered store in discovery order. A store that cannot be
/// read is reported and contributes no bookmarks.
pub fn collect(profiles: &[BrowserProfiles]) -> Vec<Bookmark> {
    collect_with(profiles, library_for)
}

pub fn collect_with<F>(profiles: &[BrowserProfiles], library_for: F) -> Vec<Bookmark>
where
    F: Fn(BrowserFamily) -> Box<dyn Library>,
{
    let mut bookmarks = vec![];

    for profile in profiles {
        let library = library_for(profile.family);

        for path in &profile.paths {
            match library.get_bookmarks(path) {
                Ok(found) => {
                    info!(
                        "Read {} {} bookmarks from \"{}\"",
                        found.len(),
                        profile.family,
                        path.display()
                    );
                    bookmarks.extend(found);
                }
                Err(error) => warn!(
                    "Error reading {} bookmarks from \"{}\": {}",
                    profile.family,
                    path.display(),
                    error
                ),
            }
        }
    }

    bookmarks
}

/// Case insensitive substring match against title or url, order preserved.
pub fn search(bookmarks: &[Bookmark], term: &str) -> Vec<Bookmark> {
    let term = term.to_lowercase();

    bookmarks
        .iter()
        .filter(|b| b.title.to_lowercase().contains(&term) || b.url.to_lowercase().contains(&term))
        .cloned()
        .collect()
}
