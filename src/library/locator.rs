use std::{
    fs, io,
    path::PathBuf,
};

use home_dir::HomeDirExt;
use log::{debug, info};

use crate::{
    error::DiscoveryError,
    types::{BrowserFamily, BrowserProfiles},
};

pub struct ProfileLayout {
    pub family: BrowserFamily,
    /// Home relative directory holding one subdirectory per profile.
    pub base_dir: &'static str,
    pub store_file: &'static str,
    /// Zero sized stores are freshly created or broken databases.
    pub skip_empty: bool,
}

/// Probe order is the order of this table.
pub const PROFILE_LAYOUTS: [ProfileLayout; 4] = [
    ProfileLayout {
        family: BrowserFamily::Firefox,
        base_dir: "~/.mozilla/firefox",
        store_file: "places.sqlite",
        skip_empty: true,
    },
    ProfileLayout {
        family: BrowserFamily::Chrome,
        base_dir: "~/.config/google-chrome",
        store_file: "Bookmarks",
        skip_empty: false,
    },
    ProfileLayout {
        family: BrowserFamily::Chromium,
        base_dir: "~/.config/chromium",
        store_file: "Bookmarks",
        skip_empty: false,
    },
    ProfileLayout {
        family: BrowserFamily::Brave,
        base_dir: "~/.config/BraveSoftware/Brave-Browser",
        store_file: "Bookmarks",
        skip_empty: false,
    },
];

pub struct ProfileLocator {
    home: Option<PathBuf>,
}

impl ProfileLocator {
    /// `home` replaces the user's home directory when given.
    pub fn new(home: Option<PathBuf>) -> Self {
        ProfileLocator { home }
    }

    pub fn discover(
        &self,
        only: Option<BrowserFamily>,
    ) -> Result<Vec<BrowserProfiles>, DiscoveryError> {
        let mut profiles = vec![];

        for layout in PROFILE_LAYOUTS.iter() {
            if only.map_or(false, |family| family != layout.family) {
                continue;
            }

            profiles.push(BrowserProfiles {
                family: layout.family,
                paths: self.find_stores(layout)?,
            });
        }

        Ok(profiles)
    }

    fn base_dir(&self, layout: &ProfileLayout) -> Result<PathBuf, DiscoveryError> {
        match &self.home {
            Some(home) => Ok(home.join(layout.base_dir.trim_start_matches("~/"))),
            None => PathBuf::from(layout.base_dir)
                .expand_home()
                .map_err(|_| DiscoveryError::NoHome {
                    family: layout.family,
                }),
        }
    }

    fn find_stores(&self, layout: &ProfileLayout) -> Result<Vec<PathBuf>, DiscoveryError> {
        let base_dir = self.base_dir(layout)?;

        if !base_dir.is_dir() {
            debug!("No {} directory at \"{}\"", layout.family, base_dir.display());
            return Ok(vec![]);
        }

        let unreadable = |source: io::Error| DiscoveryError::Unreadable {
            family: layout.family,
            path: base_dir.clone(),
            source,
        };

        let mut profile_dirs = vec![];

        for entry in fs::read_dir(&base_dir).map_err(unreadable)? {
            profile_dirs.push(entry.map_err(unreadable)?.path());
        }

        profile_dirs.sort();

        let mut stores = vec![];

        for profile_dir in profile_dirs {
            let store = profile_dir.join(layout.store_file);

            let size = match fs::metadata(&store) {
                Ok(metadata) if metadata.is_file() => metadata.len(),
                _ => continue,
            };

            if layout.skip_empty && size == 0 {
                debug!("Skipping empty store \"{}\"", store.display());
                continue;
            }

            debug!("Found {} store \"{}\"", layout.family, store.display());
            stores.push(store);
        }

        info!(
            "Found {} {} store(s) in \"{}\"",
            stores.len(),
            layout.family,
            base_dir.display()
        );

        Ok(stores)
    }
}
