use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::{
    error::SourceParseError,
    types::{Bookmark, BrowserFamily},
};

use super::Library;

const BOOKMARKS_QUERY: &str = "SELECT moz_places.url, moz_bookmarks.title
    FROM moz_places
    JOIN moz_bookmarks ON moz_places.id = moz_bookmarks.fk
    WHERE moz_bookmarks.type = 1 AND moz_places.url IS NOT NULL";

/// Reads `places.sqlite` of a Firefox profile.
pub struct FirefoxLibrary;

impl Library for FirefoxLibrary {
    fn get_bookmarks(&self, path: &Path) -> Result<Vec<Bookmark>, SourceParseError> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let mut stmt = connection.prepare(BOOKMARKS_QUERY)?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;

        let mut bookmarks = vec![];

        for row in rows {
            let (url, title) = row?;

            if is_web_url(&url) {
                bookmarks.push(Bookmark::new(url, title, BrowserFamily::Firefox));
            }
        }

        Ok(bookmarks)
    }
}

fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rstest::rstest;
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::{
        library::Library,
        types::{Bookmark, BrowserFamily},
    };

    use super::{is_web_url, FirefoxLibrary};

    // (url, title, bookmark type)
    fn create_places(dir: &Path, rows: &[(Option<&str>, Option<&str>, i64)]) -> PathBuf {
        let path = dir.join("places.sqlite");
        let connection = Connection::open(&path).unwrap();

        connection
            .execute_batch(
                "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT);
                 CREATE TABLE moz_bookmarks (id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER, title TEXT);",
            )
            .unwrap();

        for (i, (url, title, bookmark_type)) in rows.iter().enumerate() {
            let id = i as i64 + 1;
            connection
                .execute("INSERT INTO moz_places (id, url) VALUES (?1, ?2)", (id, url))
                .unwrap();
            connection
                .execute(
                    "INSERT INTO moz_bookmarks (type, fk, title) VALUES (?1, ?2, ?3)",
                    (bookmark_type, id, title),
                )
                .unwrap();
        }

        path
    }

    #[test]
    fn it_reads_url_bookmarks() {
        let dir = TempDir::new().unwrap();
        let path = create_places(
            dir.path(),
            &[
                (Some("https://example.com"), Some("Example"), 1),
                (Some("http://plain.org"), None, 1),
                (Some("https://empty-title.net"), Some(""), 1),
            ],
        );

        let bookmarks = FirefoxLibrary {}.get_bookmarks(&path).unwrap();

        assert_eq!(
            bookmarks,
            vec![
                Bookmark {
                    title: "Example".to_string(),
                    url: "https://example.com".to_string(),
                    source: BrowserFamily::Firefox,
                },
                Bookmark {
                    title: "http://plain.org".to_string(),
                    url: "http://plain.org".to_string(),
                    source: BrowserFamily::Firefox,
                },
                Bookmark {
                    title: "https://empty-title.net".to_string(),
                    url: "https://empty-title.net".to_string(),
                    source: BrowserFamily::Firefox,
                },
            ]
        );
    }

    #[test]
    fn it_skips_folders_separators_and_missing_urls() {
        let dir = TempDir::new().unwrap();
        let path = create_places(
            dir.path(),
            &[
                (Some("https://folder.com"), Some("Folder"), 2),
                (Some("https://separator.com"), None, 3),
                (None, Some("Nothing"), 1),
                (Some("https://kept.com"), Some("Kept"), 1),
            ],
        );

        let bookmarks = FirefoxLibrary {}.get_bookmarks(&path).unwrap();

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "https://kept.com");
    }

    #[test]
    fn it_skips_internal_schemes() {
        let dir = TempDir::new().unwrap();
        let path = create_places(
            dir.path(),
            &[
                (Some("place:parent=toolbar"), Some("Recent"), 1),
                (Some("about:config"), Some("Config"), 1),
                (Some("file:///etc/hosts"), Some("Hosts"), 1),
                (Some("https://kept.com"), Some("Kept"), 1),
            ],
        );

        let bookmarks = FirefoxLibrary {}.get_bookmarks(&path).unwrap();

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].title, "Kept");
    }

    #[test]
    fn it_fails_on_a_file_that_is_not_a_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("places.sqlite");
        std::fs::write(&path, "definitely not sqlite, but long enough to have a header").unwrap();

        assert!(FirefoxLibrary {}.get_bookmarks(&path).is_err());
    }

    #[test]
    fn it_fails_on_missing_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("places.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        assert!(FirefoxLibrary {}.get_bookmarks(&path).is_err());
    }

    #[rstest]
    #[case("https://example.com", true)]
    #[case("http://example.com", true)]
    #[case("ftp://example.com", false)]
    #[case("place:sort=8", false)]
    #[case("javascript:alert(1)", false)]
    fn it_recognizes_web_urls(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_web_url(url), expected);
    }
}
