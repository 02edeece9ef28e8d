//! Games directory scanning

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::descriptor::{GameDescriptor, MANIFEST_FILE, Manifest};

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("games directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("failed to read games directory {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads every game under `games_dir`, ordered by folder name.
///
/// Unlike [`get_games_from_dir`], a missing or unreadable directory is
/// reported instead of producing an empty library.
pub fn load_games(games_dir: &Path) -> Result<Vec<GameDescriptor>, LibraryError> {
    if !games_dir.is_dir() {
        return Err(LibraryError::MissingDir(games_dir.to_path_buf()));
    }
    std::fs::read_dir(games_dir).map_err(|source| LibraryError::Read {
        path: games_dir.to_path_buf(),
        source,
    })?;
    Ok(get_games_from_dir(games_dir))
}

/// Scans `games_dir` for game folders containing a valid manifest.
///
/// Folders without a manifest, or whose manifest cannot be parsed, are
/// skipped with a warning. The result is sorted by folder name so the
/// carousel order is stable between runs.
pub fn get_games_from_dir(games_dir: &Path) -> Vec<GameDescriptor> {
    let Ok(entries) = std::fs::read_dir(games_dir) else {
        return vec![];
    };

    let mut folders: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    folders
        .iter()
        .filter_map(|folder| read_game(folder))
        .collect()
}

fn read_game(folder: &Path) -> Option<GameDescriptor> {
    let manifest_path = folder.join(MANIFEST_FILE);
    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", folder.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<Manifest>(&content) {
        Ok(manifest) => Some(GameDescriptor::from_manifest(folder, manifest)),
        Err(e) => {
            tracing::warn!("Skipping {}: invalid manifest: {}", folder.display(), e);
            None
        }
    }
}
