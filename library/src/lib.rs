//! Arcade cabinet front-end
//!
//! Hosts the carousel menu from `arcade-core` in an eframe window. Games are
//! launched as separate processes; the menu only waits for them to exit.
//! This crate supplies the concrete collaborators:
//! - [`canvas::EguiCanvas`] draws through an egui painter
//! - [`input::FrameInput`] reads the keyboard (and gamepads) once per frame
//! - [`process::SystemLauncher`] spawns and polls game processes

pub mod app;
pub mod assets;
pub mod canvas;
pub mod input;
pub mod process;
