use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use env_logger::Env;
use log::error;

use crate::{
    api::cli::Cli,
    config::config::Config,
    error::SelectionError,
    launcher::Launcher,
    library::{
        collection::{collect, search},
        locator::ProfileLocator,
    },
    selector::{parse_choice, Selection, Selector},
    types::{Bookmark, BrowserProfiles},
};

mod api;
mod config;
mod error;
mod launcher;
mod library;
mod selector;
mod types;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli {};
    let program = cli.run();

    let (config, home_dir) = match load_config(program.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("Error: {:#}", e);
            return Ok(());
        }
    };
    let locator = ProfileLocator::new(home_dir);

    let profiles = match locator.discover(program.browser) {
        Ok(profiles) => profiles,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    if program.list_browsers {
        return command_list_browsers(&profiles);
    }

    let bookmarks = collect(&profiles);

    if bookmarks.is_empty() {
        println!("No bookmarks found in any browser!");
        println!("Supported browsers: Firefox, Chrome, Chromium, Brave");
        return Ok(());
    }

    let launcher = Launcher::new(&config);

    if program.list {
        command_list(&bookmarks)
    } else if let Some(term) = program.search {
        command_search(&bookmarks, &term, &launcher)
    } else {
        let selector = Selector::new(config.get_selector(), config.get_selector_args());

        command_select(&bookmarks, &selector, &launcher)
    }
}

fn load_config(config_path: Option<String>) -> Result<(Config, Option<PathBuf>)> {
    let config = Config::new_from_file(config_path)?;
    let home_dir = config.get_home_dir()?;

    Ok((config, home_dir))
}

fn command_list_browsers(profiles: &[BrowserProfiles]) -> Result<()> {
    println!("Detected browsers with bookmarks:");

    for profile in profiles.iter().filter(|p| !p.paths.is_empty()) {
        println!("  {}: {} profile(s)", profile.family, profile.paths.len());
    }

    Ok(())
}

fn command_list(bookmarks: &[Bookmark]) -> Result<()> {
    for (i, bookmark) in bookmarks.iter().enumerate() {
        println!(
            "{:3}. {:50.50} | {:50.50} | {}",
            i + 1,
            bookmark.title,
            bookmark.url,
            bookmark.source
        );
    }

    Ok(())
}

fn command_search(bookmarks: &[Bookmark], term: &str, launcher: &Launcher) -> Result<()> {
    let found = search(bookmarks, term);

    if found.is_empty() {
        println!("No bookmarks found matching '{}'", term);
        return Ok(());
    }

    for (i, bookmark) in found.iter().enumerate() {
        println!("{:3}. {}", i + 1, bookmark.title);
    }

    print!("\nSelect bookmark number (or Enter to cancel): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    match parse_choice(&answer, found.len()) {
        Ok(Some(index)) => open(launcher, &Selection::from(&found[index])),
        Ok(None) => Ok(()),
        Err(e) => {
            println!("{}", e);
            Ok(())
        }
    }
}

fn command_select(bookmarks: &[Bookmark], selector: &Selector, launcher: &Launcher) -> Result<()> {
    match selector.present(bookmarks) {
        Ok(Some(selection)) => open(launcher, &selection),
        Ok(None) => Ok(()),
        Err(SelectionError::SelectorNotFound(command)) => {
            println!(
                "Error: {} not found. Please install {} to use interactive mode.",
                command, command
            );
            println!("You can use --search or --list options instead.");
            Ok(())
        }
        Err(SelectionError::InvalidSelection) => {
            println!("{}", SelectionError::InvalidSelection);
            Ok(())
        }
        Err(e) => {
            println!("Error: cannot run {}: {}", selector.command(), e);
            Ok(())
        }
    }
}

fn open(launcher: &Launcher, selection: &Selection) -> Result<()> {
    if let Err(e) = launcher.open(selection) {
        error!("{}", e);
    }

    Ok(())
}
