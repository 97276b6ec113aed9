//! # Remote Resource
//!
//! The state a view renders from: a phase, the last resolved value and the
//! last error.

use crate::error::ViewError;

/// Lifecycle stage of an asynchronous fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncPhase {
    Idle,
    Loading,
    Resolved,
    Rejected,
}

/// Result of the latest fetch, as seen by the view that owns it.
///
/// While a refetch is `Loading` the previously resolved value stays available
/// so lists keep showing server-confirmed rows until the new page arrives. A
/// rejection clears the value: a failed render pass shows no partial content.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource<T> {
    phase: AsyncPhase,
    value: Option<T>,
    error: Option<ViewError>,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> RemoteResource<T> {
    pub fn idle() -> Self {
        Self {
            phase: AsyncPhase::Idle,
            value: None,
            error: None,
        }
    }

    pub fn phase(&self) -> AsyncPhase {
        self.phase
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AsyncPhase::Loading
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == AsyncPhase::Resolved
    }

    pub fn is_rejected(&self) -> bool {
        self.phase == AsyncPhase::Rejected
    }

    pub(crate) fn begin(&mut self) {
        self.phase = AsyncPhase::Loading;
        self.error = None;
    }

    pub(crate) fn resolve(&mut self, value: T) {
        self.phase = AsyncPhase::Resolved;
        self.value = Some(value);
        self.error = None;
    }

    pub(crate) fn reject(&mut self, error: ViewError) {
        self.phase = AsyncPhase::Rejected;
        self.value = None;
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EndpointError;

    #[test]
    fn test_phase_transitions() {
        let mut resource = RemoteResource::idle();
        assert_eq!(resource.phase(), AsyncPhase::Idle);

        resource.begin();
        assert!(resource.is_loading());
        assert!(resource.value().is_none());

        resource.resolve(vec![1, 2]);
        assert!(resource.is_resolved());

        // Refetch keeps the last value visible
        resource.begin();
        assert!(resource.is_loading());
        assert_eq!(resource.value(), Some(&vec![1, 2]));

        resource.reject(ViewError::Fetch(EndpointError::Transport("offline".into())));
        assert!(resource.is_rejected());
        assert!(resource.value().is_none());
        assert!(resource.error().is_some());
    }
}
