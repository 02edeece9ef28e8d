//! Game library
//!
//! Discovers the games installed on the cabinet. Each game lives in its own
//! folder with a `manifest.json` describing it.

mod descriptor;
mod scan;

pub use descriptor::{GameDescriptor, Manifest, MANIFEST_FILE};
pub use scan::{LibraryError, get_games_from_dir, load_games};
