//! Arcade cabinet core
//!
//! Platform-agnostic logic for the cabinet front-end:
//! - A carousel of games stored as a ring
//! - Timed, animated tooltips
//! - The menu controller that launches games as separate processes and
//!   keeps the mouse parked while they run
//!
//! Rendering, input and process creation are reached through the traits in
//! [`draw`], [`input`] and [`process`], so everything here runs without a
//! window or a real child process.

pub mod config;
pub mod draw;
pub mod input;
pub mod library;
pub mod menu;
pub mod process;

#[cfg(test)]
pub(crate) mod test_support;

pub use library::GameDescriptor;
pub use menu::{Menu, MenuState};
