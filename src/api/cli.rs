use clap::{builder::NonEmptyStringValueParser, Parser};

use crate::types::BrowserFamily;

pub struct Cli;

impl Cli {
    pub fn run(&self) -> CliProgram {
        CliProgram::parse()
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Search and open bookmarks of Firefox, Chrome, Chromium and Brave"
)]
pub struct CliProgram {
    #[arg(long, value_enum, help = "Use only bookmarks of this browser")]
    pub browser: Option<BrowserFamily>,

    #[arg(long, help = "List detected browsers with bookmarks")]
    pub list_browsers: bool,

    #[arg(long, help = "List all bookmarks without opening")]
    pub list: bool,

    #[arg(
        long,
        value_name = "TERM",
        value_parser = NonEmptyStringValueParser::new(),
        help = "Show bookmarks matching TERM in title or url, and pick one by number"
    )]
    pub search: Option<String>,

    #[arg(
        long,
        short,
        value_name = "FILE_PATH",
        help = "Custom path to config file"
    )]
    pub config: Option<String>,
}
