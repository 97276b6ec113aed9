//! # Row Actions
//!
//! A [`RowAction`] is an operation scoped to one list item, such as removing
//! a business hour. Actions marked `confirm` must pass through an explicit
//! confirmation that can be cancelled without side effects:
//!
//! ```text
//! confirm:    Idle -> ConfirmPending -> Executing -> Idle
//!                           |
//!                           +-> Idle (cancel)
//! no confirm: Idle -> Armed -> Executing -> Idle
//! ```
//!
//! Nothing is removed optimistically. The owning view reloads after success
//! and reports the error after failure.

use crate::endpoint::RemoteMethod;
use crate::error::ViewError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The row an action is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTarget {
    pub id: String,
    /// Optional discriminator passed to the remote method (e.g. `custom`).
    pub kind: Option<String>,
}

impl RowTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActionState {
    Idle,
    Armed(RowTarget),
    ConfirmPending(RowTarget),
    Executing(RowTarget),
}

/// What [`RowAction::begin`] asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Show a confirmation; call `execute` or `cancel` next.
    Confirm,
    /// Call `execute` right away.
    Ready,
}

pub struct RowAction {
    label: String,
    confirm: bool,
    method: Arc<dyn RemoteMethod>,
    state: RowActionState,
}

impl RowAction {
    pub fn new(label: impl Into<String>, confirm: bool, method: Arc<dyn RemoteMethod>) -> Self {
        Self {
            label: label.into(),
            confirm,
            method,
            state: RowActionState::Idle,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn requires_confirmation(&self) -> bool {
        self.confirm
    }

    pub fn state(&self) -> &RowActionState {
        &self.state
    }

    /// The row awaiting confirmation, if any.
    pub fn pending_target(&self) -> Option<&RowTarget> {
        match &self.state {
            RowActionState::ConfirmPending(target) => Some(target),
            _ => None,
        }
    }

    pub fn begin(&mut self, target: RowTarget) -> Result<Gate, ViewError> {
        if self.state != RowActionState::Idle {
            return Err(ViewError::InvalidTransition(format!(
                "{} already in progress: {:?}",
                self.label, self.state
            )));
        }
        debug!(action = %self.label, row_id = %target.id, confirm = self.confirm, "Row action started");
        if self.confirm {
            self.state = RowActionState::ConfirmPending(target);
            Ok(Gate::Confirm)
        } else {
            self.state = RowActionState::Armed(target);
            Ok(Gate::Ready)
        }
    }

    /// Drops a pending confirmation. Returns `false` when there was none.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, RowActionState::Idle) {
            RowActionState::ConfirmPending(target) => {
                debug!(action = %self.label, row_id = %target.id, "Row action cancelled");
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Runs the remote method for the armed or confirmed row.
    ///
    /// Always ends `Idle`, whatever the outcome.
    pub async fn execute(&mut self) -> Result<RowTarget, ViewError> {
        let target = match std::mem::replace(&mut self.state, RowActionState::Idle) {
            RowActionState::Armed(target) | RowActionState::ConfirmPending(target) => target,
            other => {
                let err = ViewError::InvalidTransition(format!(
                    "{} cannot execute from {:?}",
                    self.label, other
                ));
                self.state = other;
                return Err(err);
            }
        };

        let result = {
            let _executing = Executing::start(&mut self.state, target.clone());
            self.method.call(&target.id, target.kind.as_deref()).await
        };

        match result {
            Ok(()) => {
                info!(method = self.method.name(), row_id = %target.id, "Row action ok");
                Ok(target)
            }
            Err(e) => {
                warn!(method = self.method.name(), row_id = %target.id, error = %e, "Row action failed");
                Err(ViewError::RemoteAction(e))
            }
        }
    }
}

/// Holds the state at `Executing` and puts it back to `Idle` when dropped,
/// including when the `execute` future is dropped mid-call.
struct Executing<'a> {
    state: &'a mut RowActionState,
}

impl<'a> Executing<'a> {
    fn start(state: &'a mut RowActionState, target: RowTarget) -> Self {
        *state = RowActionState::Executing(target);
        Self { state }
    }
}

impl Drop for Executing<'_> {
    fn drop(&mut self) {
        *self.state = RowActionState::Idle;
    }
}

impl std::fmt::Debug for RowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .field("confirm", &self.confirm)
            .field("method", &self.method.name())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EndpointError;
    use crate::mock::MockMethod;

    #[tokio::test]
    async fn test_cancel_has_no_side_effects() {
        let method = MockMethod::new("livechat:removeBusinessHour");
        let mut action = RowAction::new("Remove", true, Arc::new(method.clone()));

        assert_eq!(action.begin(RowTarget::new("bh-1")).unwrap(), Gate::Confirm);
        assert_eq!(action.pending_target(), Some(&RowTarget::new("bh-1")));
        assert!(action.cancel());
        assert_eq!(action.state(), &RowActionState::Idle);
        assert!(!action.cancel());
        assert!(method.calls().is_empty());
        assert!(action.execute().await.is_err());
    }

    #[tokio::test]
    async fn test_execute_always_returns_to_idle() {
        let method = MockMethod::new("livechat:removeBusinessHour");
        method.expect_call().return_err(EndpointError::Remote("denied".into()));
        method.expect_call().return_ok();
        let mut action = RowAction::new("Remove", true, Arc::new(method.clone()));

        action.begin(RowTarget::new("bh-1").with_kind("custom")).unwrap();
        assert!(action.begin(RowTarget::new("bh-2")).is_err());
        let err = action.execute().await.unwrap_err();
        assert!(matches!(err, ViewError::RemoteAction(_)));
        assert_eq!(action.state(), &RowActionState::Idle);

        action.begin(RowTarget::new("bh-1").with_kind("custom")).unwrap();
        let target = action.execute().await.unwrap();
        assert_eq!(target.id, "bh-1");
        assert_eq!(action.state(), &RowActionState::Idle);
        method.verify();
    }

    /// A remote method that never answers.
    struct Hanging;

    #[async_trait::async_trait]
    impl RemoteMethod for Hanging {
        fn name(&self) -> &'static str {
            "livechat:removeBusinessHour"
        }

        async fn call(&self, _id: &str, _kind: Option<&str>) -> Result<(), EndpointError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropped_execute_returns_to_idle() {
        let mut action = RowAction::new("Remove", true, Arc::new(Hanging));
        action.begin(RowTarget::new("bh-1")).unwrap();

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(10), action.execute()).await;
        assert!(timed_out.is_err());

        assert_eq!(action.state(), &RowActionState::Idle);
        assert_eq!(action.begin(RowTarget::new("bh-2")).unwrap(), Gate::Confirm);
    }

    #[tokio::test]
    async fn test_unconfirmed_action_is_ready() {
        let method = MockMethod::new("rooms:archive");
        method.expect_call().return_ok();
        let mut action = RowAction::new("Archive", false, Arc::new(method.clone()));

        assert_eq!(action.begin(RowTarget::new("r-1")).unwrap(), Gate::Ready);
        assert!(!action.cancel());
        action.execute().await.unwrap();
        assert_eq!(method.calls(), vec![("r-1".to_string(), None)]);
    }
}
