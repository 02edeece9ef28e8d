//! Process collaborator
//!
//! Games run as independent OS processes. The menu only ever launches them
//! and polls whether they are still alive.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::GameDescriptor;

/// Opaque handle to a launched process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessHandle(pub u64);

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl LaunchRequest {
    /// `folder/exe`, run from inside `folder`.
    pub fn for_game(game: &GameDescriptor) -> Self {
        Self {
            program: game.executable_path(),
            args: game.args.clone(),
            working_dir: game.folder.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("game executable not found: {}", program.display())]
    NotFound { program: PathBuf },
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Starts games and reports whether they are still running.
pub trait ProcessLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> Result<ProcessHandle, LaunchError>;

    /// Non-blocking. Any failure to query the process counts as "not running".
    fn is_running(&mut self, handle: ProcessHandle) -> bool;
}
