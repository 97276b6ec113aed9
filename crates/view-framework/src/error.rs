//! # Framework Errors
//!
//! Two layers: [`EndpointError`] is what a transport reports, [`ViewError`] is
//! what a view surfaces. The split mirrors how failures are presented:
//!
//! - **Fetch** failures replace the view body for that render pass.
//! - **Validation** failures disable save; they are preconditions, not crashes.
//! - **Remote action** failures become a transient notification and leave the
//!   draft and the list untouched so the user can retry.

/// Failure reported by a data source or remote method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Remote error: {0}")]
    Remote(String),
}

/// Errors that can occur within a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("View closed")]
    ViewClosed,
    #[error("View dropped response channel")]
    ViewDropped,
    #[error("Fetch failed: {0}")]
    Fetch(EndpointError),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Remote action failed: {0}")]
    RemoteAction(EndpointError),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(String),
}

impl ViewError {
    /// True for failures the user can retry without losing the draft.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ViewError::RemoteAction(_) | ViewError::Validation(_) | ViewError::InvalidTransition(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ViewError::Fetch(EndpointError::Http {
            status: 404,
            message: "not found".into(),
        });
        assert_eq!(err.to_string(), "Fetch failed: HTTP 404: not found");
        assert!(!err.is_recoverable());

        let err = ViewError::RemoteAction(EndpointError::Remote("denied".into()));
        assert_eq!(err.to_string(), "Remote action failed: Remote error: denied");
        assert!(err.is_recoverable());
    }
}
