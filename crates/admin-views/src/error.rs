//! Error types for the admin screens.

use thiserror::Error;
use view_framework::ViewError;

/// Errors surfaced by the admin console and its view clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    /// The console configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    View(#[from] ViewError),

    /// An error occurred while communicating with a view actor.
    #[error("View communication error: {0}")]
    ViewCommunicationError(String),
}
