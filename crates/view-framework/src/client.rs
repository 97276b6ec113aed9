//! # View Handle
//!
//! The client half of a [`ViewActor`](crate::ViewActor).

use crate::error::ViewError;
use crate::message::ViewRequest;
use crate::view::View;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for talking to a running view.
///
/// Holds only a sender, so cloning is cheap. Once the view is unmounted every
/// call fails with [`ViewError::ViewClosed`].
pub struct ViewHandle<V: View> {
    sender: mpsc::Sender<ViewRequest<V>>,
}

// Manual impl: deriving would require `V: Clone`.
impl<V: View> Clone for ViewHandle<V> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<V: View> ViewHandle<V> {
    pub fn new(sender: mpsc::Sender<ViewRequest<V>>) -> Self {
        Self { sender }
    }

    /// Sends one event and returns the snapshot right after it was handled.
    pub async fn dispatch(&self, event: V::Event) -> Result<V::Snapshot, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Dispatch { event, respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewDropped)?
    }

    pub async fn snapshot(&self) -> Result<V::Snapshot, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Snapshot { respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewDropped)?
    }

    /// Waits until no fetch is in flight, then returns the snapshot.
    pub async fn settled(&self) -> Result<V::Snapshot, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Settled { respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewDropped)?
    }

    pub async fn unmount(&self) -> Result<(), ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Unmount { respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewDropped)?
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
