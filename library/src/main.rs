//! Arcade machine front-end
//!
//! Shows every installed game in a carousel and launches the selected one
//! as a separate process.
//!
//! # Usage
//!
//! ```text
//! arcade-machine [--windowed | --fullscreen] [--games <dir>]
//! ```
//!
//! Without `--games` the directory comes from `config.toml`, or defaults to
//! `<data_dir>/games`.

use anyhow::{Context, Result};
use arcade_core::config;
use arcade_core::library::{LibraryError, load_games};
use arcade_core::GameDescriptor;
use std::env;
use std::path::{Path, PathBuf};

/// Options parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    /// Overrides `video.fullscreen`
    fullscreen: Option<bool>,
    /// Overrides `library.games_dir`
    games_dir: Option<PathBuf>,
    help: bool,
}

/// Parse options from command line args
fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-f" | "--fullscreen" => options.fullscreen = Some(true),
            "-w" | "--windowed" => options.fullscreen = Some(false),
            "-g" | "--games" => {
                if let Some(dir) = iter.next() {
                    options.games_dir = Some(PathBuf::from(dir));
                }
            }
            "-h" | "--help" => options.help = true,
            other => tracing::warn!("Ignoring unknown argument '{}'", other),
        }
    }

    options
}

/// Loads the library, treating a missing directory as an empty one.
fn load_or_empty(dir: &Path) -> Vec<GameDescriptor> {
    match load_games(dir) {
        Ok(games) => games,
        Err(LibraryError::MissingDir(dir)) => {
            tracing::warn!("No games directory at {}", dir.display());
            Vec::new()
        }
        Err(e) => {
            tracing::error!("{}", e);
            Vec::new()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_options(&args);
    if options.help {
        println!("Usage: arcade-machine [--windowed | --fullscreen] [--games <dir>]");
        return Ok(());
    }

    let mut config = config::load();
    if let Some(fullscreen) = options.fullscreen {
        config.video.fullscreen = fullscreen;
    }

    // An explicitly requested directory must exist
    let games = match &options.games_dir {
        Some(dir) => load_games(dir)
            .with_context(|| format!("Cannot load games from --games {}", dir.display()))?,
        None => match config.games_dir() {
            Some(dir) => load_or_empty(&dir),
            None => {
                tracing::warn!("Could not determine data directory, no games loaded");
                Vec::new()
            }
        },
    };
    tracing::info!("Found {} games", games.len());

    arcade_library::app::run(config, games).map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
