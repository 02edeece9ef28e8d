//! Errors that stop the cabinet window from running

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The native window or its renderer could not be created, or the event
    /// loop failed while running.
    #[error("eframe error: {0}")]
    Eframe(#[from] eframe::Error),
}
