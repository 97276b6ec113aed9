//! # View Actor
//!
//! [`ViewActor`] hosts one [`View`] in its own task. It is the "Server" half:
//! it owns the view (and with it every draft, data source and row action) and
//! processes requests sequentially, so view state needs no locks.
//!
//! Between requests the loop also awaits the view's in-flight fetches. A
//! request that arrives while a fetch is pending wins the race; the fetch is
//! picked up again on the next iteration.

use crate::client::ViewHandle;
use crate::error::ViewError;
use crate::message::{Response, ViewRequest};
use crate::view::View;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that runs a single view instance.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ViewActor::new(view, buffer)` returns the actor and a [`ViewHandle`].
/// 2.  **Wire**: pass collaborators as the view's `Context` into `actor.run(context)`.
/// 3.  **Run**: spawn the loop; talk to the view through the handle.
///
/// The loop ends when [`ViewHandle::unmount`] is called or every handle is
/// dropped. Either way [`View::on_unmount`] runs exactly once.
pub struct ViewActor<V: View> {
    receiver: mpsc::Receiver<ViewRequest<V>>,
    view: V,
    waiters: Vec<Response<V::Snapshot>>,
}

enum Step<V: View> {
    Request(Option<ViewRequest<V>>),
    Settled(bool),
}

impl<V: View> ViewActor<V> {
    /// Creates the actor and its handle.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(view: V, buffer_size: usize) -> (Self, ViewHandle<V>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            view,
            waiters: Vec::new(),
        };
        (actor, ViewHandle::new(sender))
    }

    /// Runs the view until it is unmounted or every handle is gone.
    pub async fn run(mut self, context: V::Context) {
        // Extract just the type name (e.g., "UserInfoView" instead of the full path)
        let view_type = std::any::type_name::<V>()
            .split('<')
            .next()
            .and_then(|path| path.split("::").last())
            .unwrap_or("Unknown");
        info!(view_type, "View mounted");

        if let Err(e) = self.view.on_mount(&context).await {
            warn!(view_type, error = %e, "on_mount failed");
        }

        loop {
            let pending = self.view.has_pending();
            let step = tokio::select! {
                request = self.receiver.recv() => Step::Request(request),
                applied = self.view.settle(&context), if pending => Step::Settled(applied),
            };

            match step {
                Step::Settled(applied) => {
                    debug!(view_type, applied, "Settled");
                }
                Step::Request(None) => break,
                Step::Request(Some(request)) => {
                    if !self.handle_request(request, &context, view_type).await {
                        break;
                    }
                }
            }

            if !self.waiters.is_empty() && !self.view.has_pending() {
                let snapshot = self.view.snapshot(&context);
                for waiter in self.waiters.drain(..) {
                    let _ = waiter.send(Ok(snapshot.clone()));
                }
            }
        }

        self.view.on_unmount();
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(Err(ViewError::ViewClosed));
        }
        info!(view_type, "View unmounted");
    }

    /// Returns `false` when the loop must stop.
    async fn handle_request(
        &mut self,
        request: ViewRequest<V>,
        context: &V::Context,
        view_type: &str,
    ) -> bool {
        match request {
            ViewRequest::Dispatch { event, respond_to } => {
                debug!(view_type, ?event, "Dispatch");
                let result = match self.view.handle_event(event, context).await {
                    Ok(()) => Ok(self.view.snapshot(context)),
                    Err(e) => {
                        warn!(view_type, error = %e, "Event failed");
                        Err(e)
                    }
                };
                let _ = respond_to.send(result);
                true
            }
            ViewRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.view.snapshot(context)));
                true
            }
            ViewRequest::Settled { respond_to } => {
                self.waiters.push(respond_to);
                true
            }
            ViewRequest::Unmount { respond_to } => {
                debug!(view_type, "Unmount requested");
                let _ = respond_to.send(Ok(()));
                false
            }
        }
    }
}
