//! # View Messages
//!
//! Requests a [`ViewHandle`](crate::ViewHandle) sends to a
//! [`ViewActor`](crate::ViewActor).

use crate::error::ViewError;
use crate::view::View;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by view actors.
pub type Response<T> = oneshot::Sender<Result<T, ViewError>>;

/// Internal message type sent to a view actor.
///
/// - **Dispatch**: feed one event to the view, answer with the snapshot after it.
/// - **Snapshot**: answer with the current snapshot.
/// - **Settled**: answer once no fetch is in flight.
/// - **Unmount**: stop the view. Later requests fail with `ViewClosed`.
#[derive(Debug)]
pub enum ViewRequest<V: View> {
    Dispatch {
        event: V::Event,
        respond_to: Response<V::Snapshot>,
    },
    Snapshot {
        respond_to: Response<V::Snapshot>,
    },
    Settled {
        respond_to: Response<V::Snapshot>,
    },
    Unmount {
        respond_to: Response<()>,
    },
}
