use std::{
    io::{self, Write},
    process::{ChildStdin, Command, Stdio},
    thread,
};

use log::debug;

use crate::{
    error::SelectionError,
    types::{Bookmark, BrowserFamily},
};

/// What the user picked: enough to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    pub source: Option<BrowserFamily>,
}

impl From<&Bookmark> for Selection {
    fn from(bookmark: &Bookmark) -> Self {
        Selection {
            url: bookmark.url.clone(),
            source: Some(bookmark.source),
        }
    }
}

pub fn format_line(bookmark: &Bookmark) -> String {
    format!("{} | {} | {}", bookmark.title, bookmark.url, bookmark.source)
}

/// Splits `<title> | <url> | <source>` from the right, titles may contain `|`.
pub fn parse_selection_line(line: &str) -> Result<Selection, SelectionError> {
    let mut fields = line.trim().rsplitn(3, '|');

    let source = fields.next().map(str::trim);
    let url = fields.next().map(str::trim);

    match (url, source, fields.next()) {
        (Some(url), Some(source), Some(_)) if !url.is_empty() => Ok(Selection {
            url: url.to_string(),
            source: source.parse().ok(),
        }),
        _ => Err(SelectionError::InvalidSelection),
    }
}

/// Maps the answer to the numbered prompt of search mode to an index.
/// An empty answer cancels.
pub fn parse_choice(input: &str, count: usize) -> Result<Option<usize>, SelectionError> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Ok(Some(n - 1)),
        _ => Err(SelectionError::InvalidSelection),
    }
}

/// External line oriented fuzzy finder, fed one bookmark per line on stdin.
pub struct Selector {
    command: String,
    args: Vec<String>,
}

impl Selector {
    pub fn new(command: &str, args: &[String]) -> Self {
        Selector {
            command: command.to_string(),
            args: args.to_vec(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn present(&self, bookmarks: &[Bookmark]) -> Result<Option<Selection>, SelectionError> {
        let input = bookmarks
            .iter()
            .map(format_line)
            .collect::<Vec<String>>()
            .join("\n");

        let line = match self.run(&input)? {
            Some(line) => line,
            None => return Ok(None),
        };

        if let Some(bookmark) = bookmarks.iter().find(|b| format_line(b) == line) {
            return Ok(Some(Selection::from(bookmark)));
        }

        parse_selection_line(&line).map(Some)
    }

    fn run(&self, input: &str) -> Result<Option<String>, SelectionError> {
        debug!("Running selector {} {:?}", self.command, self.args);

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SelectionError::SelectorNotFound(self.command.clone()),
                _ => SelectionError::Io(e),
            })?;

        let stdin = child.stdin.take();

        // Feed stdin while stdout is drained, filters may answer before reading everything.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || write_input(stdin, input));
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "selector input writer panicked"))
            });

            (output, written)
        });

        let output = output?;
        written?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.trim();

        if !output.status.success() || line.is_empty() {
            return Ok(None);
        }

        Ok(Some(line.to_string()))
    }
}

fn write_input(stdin: Option<ChildStdin>, input: &str) -> io::Result<()> {
    if let Some(mut stdin) = stdin {
        // The selector may quit before reading everything.
        match stdin.write_all(input.as_bytes()) {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{
        error::SelectionError,
        types::{Bookmark, BrowserFamily},
    };

    use super::{format_line, parse_choice, parse_selection_line, Selection, Selector};

    fn sample() -> Vec<Bookmark> {
        vec![
            Bookmark {
                title: "Rust".to_string(),
                url: "https://www.rust-lang.org".to_string(),
                source: BrowserFamily::Firefox,
            },
            Bookmark {
                title: "A | B".to_string(),
                url: "https://pipes.com".to_string(),
                source: BrowserFamily::Brave,
            },
        ]
    }

    #[test]
    fn it_formats_three_fields() {
        assert_eq!(
            format_line(&sample()[0]),
            "Rust | https://www.rust-lang.org | firefox"
        );
    }

    #[rstest]
    #[case("Rust | https://www.rust-lang.org | firefox", "https://www.rust-lang.org", Some(BrowserFamily::Firefox))]
    #[case("A | B | https://pipes.com | brave", "https://pipes.com", Some(BrowserFamily::Brave))]
    #[case("x | https://x.com | opera\n", "https://x.com", None)]
    fn it_parses_selected_lines(
        #[case] line: &str,
        #[case] url: &str,
        #[case] source: Option<BrowserFamily>,
    ) {
        assert_eq!(
            parse_selection_line(line).unwrap(),
            Selection {
                url: url.to_string(),
                source,
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("just a title")]
    #[case("title | https://x.com")]
    #[case("title |  | chrome")]
    fn it_rejects_malformed_lines(#[case] line: &str) {
        assert!(matches!(
            parse_selection_line(line),
            Err(SelectionError::InvalidSelection)
        ));
    }

    #[rstest]
    #[case("", 3, None)]
    #[case("  \n", 3, None)]
    #[case("1", 3, Some(0))]
    #[case("3\n", 3, Some(2))]
    fn it_accepts_choices(#[case] input: &str, #[case] count: usize, #[case] expected: Option<usize>) {
        assert_eq!(parse_choice(input, count).unwrap(), expected);
    }

    #[rstest]
    #[case("0", 3)]
    #[case("4", 3)]
    #[case("-1", 3)]
    #[case("abc", 3)]
    #[case("1", 0)]
    fn it_rejects_invalid_choices(#[case] input: &str, #[case] count: usize) {
        assert!(matches!(
            parse_choice(input, count),
            Err(SelectionError::InvalidSelection)
        ));
    }

    #[test]
    fn it_reports_missing_selector() {
        let selector = Selector::new("fzbmark-selector-that-does-not-exist", &[]);

        assert!(matches!(
            selector.present(&sample()),
            Err(SelectionError::SelectorNotFound(name)) if name == "fzbmark-selector-that-does-not-exist"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn it_maps_selected_line_back_to_bookmark() {
        let selector = Selector::new("sed", &["-n".to_string(), "2p".to_string()]);

        assert_eq!(
            selector.present(&sample()).unwrap(),
            Some(Selection {
                url: "https://pipes.com".to_string(),
                source: Some(BrowserFamily::Brave),
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn it_drains_output_of_filters_echoing_their_input() {
        let bookmarks: Vec<Bookmark> = (0..20_000)
            .map(|i| Bookmark {
                title: format!("Bookmark number {}", i),
                url: format!("https://example.com/{}", i),
                source: BrowserFamily::Chromium,
            })
            .collect();
        let input = bookmarks
            .iter()
            .map(format_line)
            .collect::<Vec<String>>()
            .join("\n");

        let output = Selector::new("cat", &[]).run(&input).unwrap().unwrap();

        assert_eq!(output.lines().count(), 20_000);
        assert_eq!(output, input);
    }

    #[cfg(unix)]
    #[test]
    fn it_returns_nothing_when_selector_is_aborted() {
        let selector = Selector::new("false", &[]);

        assert_eq!(selector.present(&sample()).unwrap(), None);
    }
}
