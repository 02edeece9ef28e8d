//! Game process launching
//!
//! Each game runs as its own OS process started from its folder. The menu
//! keeps the `Child` so it can poll for exit without blocking a frame.

use std::process::{Child, Command};

use arcade_core::process::{LaunchError, LaunchRequest, ProcessHandle, ProcessLauncher};
use hashbrown::HashMap;

/// Spawns games with [`std::process::Command`].
#[derive(Debug, Default)]
pub struct SystemLauncher {
    children: HashMap<ProcessHandle, Child>,
    next_id: u64,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of launched processes not yet seen to exit.
    pub fn tracked(&self) -> usize {
        self.children.len()
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> Result<ProcessHandle, LaunchError> {
        // Spawn an absolute path; relative ones resolve per-platform after current_dir
        let program = std::fs::canonicalize(&request.program).map_err(|_| LaunchError::NotFound {
            program: request.program.clone(),
        })?;
        if !program.is_file() {
            return Err(LaunchError::NotFound {
                program: request.program.clone(),
            });
        }

        tracing::debug!(
            "Spawning {} {:?} in {}",
            program.display(),
            request.args,
            request.working_dir.display()
        );
        let child = Command::new(&program)
            .args(&request.args)
            .current_dir(&request.working_dir)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: request.program.clone(),
                source,
            })?;

        self.next_id += 1;
        let handle = ProcessHandle(self.next_id);
        tracing::info!("Game process {} started (pid {})", handle, child.id());
        self.children.insert(handle, child);
        Ok(handle)
    }

    fn is_running(&mut self, handle: ProcessHandle) -> bool {
        let Some(child) = self.children.get_mut(&handle) else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::info!("Game process {} exited: {}", handle, status);
                self.children.remove(&handle);
                false
            }
            Err(e) => {
                tracing::warn!("Lost track of game process {}: {}", handle, e);
                self.children.remove(&handle);
                false
            }
        }
    }
}
