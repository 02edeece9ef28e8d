//! Game descriptors and their on-disk manifest

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the per-game manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// `manifest.json` as stored in a game folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
    pub rating: String,
    /// Source repository URL
    pub repo: String,
    /// Executable file name, relative to the game folder
    pub exe: String,
    /// Carousel image, relative to the game folder
    pub image: String,
    /// Extra command-line arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// An installed game. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDescriptor {
    /// Folder holding the game
    pub folder: PathBuf,
    pub exe: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub language: String,
    pub rating: String,
    pub repo: String,
    pub image: String,
    pub args: Vec<String>,
}

impl GameDescriptor {
    pub fn from_manifest(folder: &Path, manifest: Manifest) -> Self {
        Self {
            folder: folder.to_path_buf(),
            exe: manifest.exe,
            title: manifest.title,
            author: manifest.author,
            genre: manifest.genre,
            language: manifest.language,
            rating: manifest.rating,
            repo: manifest.repo,
            image: manifest.image,
            args: manifest.args,
        }
    }

    pub fn executable_path(&self) -> PathBuf {
        self.folder.join(&self.exe)
    }

    pub fn image_path(&self) -> PathBuf {
        self.folder.join(&self.image)
    }
}
