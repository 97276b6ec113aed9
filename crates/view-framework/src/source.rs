//! # Endpoint Data Source
//!
//! [`EndpointData`] fetches through an [`Endpoint`] and keeps the result in a
//! [`RemoteResource`]. It is owned by exactly one view, so nothing here is
//! locked: fetches run as spawned tasks and report back over a channel that
//! the owning view drains from its own loop.
//!
//! ## Ordering
//!
//! Every fetch takes a fresh ticket. A completion is applied only when its
//! ticket is still the latest one; anything older is discarded as stale. This
//! is what keeps a slow response for filter `"a"` from overwriting the page for
//! `"ab"` that arrived first.
//!
//! ## Unmount
//!
//! [`EndpointData::unmount`] aborts in-flight tasks and closes the channel.
//! After that, late completions have nowhere to go and new fetches are ignored.

use crate::endpoint::Endpoint;
use crate::error::{EndpointError, ViewError};
use crate::resource::{AsyncPhase, RemoteResource};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A finished fetch travelling back to its source.
#[derive(Debug)]
struct Completion<T> {
    ticket: u64,
    result: Result<T, EndpointError>,
}

/// What happened to one received completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The completion carried the latest ticket and moved the resource into this phase.
    Applied(AsyncPhase),
    /// The completion was superseded by a newer fetch and dropped.
    Stale { ticket: u64, current: u64 },
}

impl Settled {
    pub fn is_applied(&self) -> bool {
        matches!(self, Settled::Applied(_))
    }
}

pub struct EndpointData<E: Endpoint> {
    endpoint: Arc<E>,
    resource: RemoteResource<E::Output>,
    params: Option<E::Params>,
    ticket: u64,
    pending: usize,
    mounted: bool,
    sender: mpsc::UnboundedSender<Completion<E::Output>>,
    receiver: mpsc::UnboundedReceiver<Completion<E::Output>>,
    tasks: Vec<JoinHandle<()>>,
}

impl<E: Endpoint> EndpointData<E> {
    pub fn new(endpoint: E) -> Self {
        Self::from_arc(Arc::new(endpoint))
    }

    /// Builds a source over an endpoint shared with other views.
    pub fn from_arc(endpoint: Arc<E>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            endpoint,
            resource: RemoteResource::idle(),
            params: None,
            ticket: 0,
            pending: 0,
            mounted: true,
            sender,
            receiver,
            tasks: Vec::new(),
        }
    }

    pub fn resource(&self) -> &RemoteResource<E::Output> {
        &self.resource
    }

    pub fn phase(&self) -> AsyncPhase {
        self.resource.phase()
    }

    pub fn value(&self) -> Option<&E::Output> {
        self.resource.value()
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.resource.error()
    }

    /// Parameters of the most recent fetch.
    pub fn params(&self) -> Option<&E::Params> {
        self.params.as_ref()
    }

    /// Ticket of the most recent fetch; 0 before the first one.
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True while some spawned fetch has not reported back yet.
    pub fn has_pending(&self) -> bool {
        self.mounted && self.pending > 0
    }

    /// Starts a fetch with `params`. Ignored once unmounted.
    pub fn fetch(&mut self, params: E::Params) {
        if !self.mounted {
            debug!(endpoint = self.endpoint.name(), "Fetch ignored after unmount");
            return;
        }

        self.ticket += 1;
        let ticket = self.ticket;
        debug!(endpoint = self.endpoint.name(), ticket, ?params, "Fetch");

        self.resource.begin();
        self.params = Some(params.clone());
        self.pending += 1;
        self.tasks.retain(|task| !task.is_finished());

        let endpoint = Arc::clone(&self.endpoint);
        let sender = self.sender.clone();
        self.tasks.push(tokio::spawn(async move {
            let result = endpoint.fetch(params).await;
            // The receiver is gone after unmount; the completion is moot then.
            let _ = sender.send(Completion { ticket, result });
        }));
    }

    /// Fetches only when `params` differ from the last fetched ones.
    pub fn set_params(&mut self, params: E::Params) -> bool {
        if self.params.as_ref() == Some(&params) {
            return false;
        }
        self.fetch(params);
        true
    }

    /// Re-runs the last fetch with identical parameters.
    ///
    /// Returns `false` when nothing has been fetched yet or the source is
    /// unmounted.
    pub fn reload(&mut self) -> bool {
        match (self.mounted, self.params.clone()) {
            (true, Some(params)) => {
                self.fetch(params);
                true
            }
            _ => false,
        }
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `None` when nothing is in flight. Cancel safe: dropping the
    /// future before it resolves loses no completion.
    pub async fn next_completion(&mut self) -> Option<Settled> {
        if !self.has_pending() {
            return None;
        }
        let completion = self.receiver.recv().await?;
        Some(self.apply(completion))
    }

    /// Waits until the latest fetch has been applied.
    pub async fn settle_current(&mut self) {
        while self.resource.is_loading() {
            if self.next_completion().await.is_none() {
                break;
            }
        }
    }

    /// Applies every completion that has already arrived, without waiting.
    pub fn try_settle(&mut self) -> Vec<Settled> {
        let mut settled = Vec::new();
        while self.has_pending() {
            match self.receiver.try_recv() {
                Ok(completion) => settled.push(self.apply(completion)),
                Err(_) => break,
            }
        }
        settled
    }

    /// Stops the source: aborts fetches, drops late completions, ignores new
    /// fetches. The last resource state is kept for a final snapshot.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.pending = 0;
        self.receiver.close();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        debug!(endpoint = self.endpoint.name(), ticket = self.ticket, "Unmounted");
    }

    fn apply(&mut self, completion: Completion<E::Output>) -> Settled {
        self.pending = self.pending.saturating_sub(1);
        let endpoint = self.endpoint.name();

        if completion.ticket != self.ticket {
            debug!(
                endpoint,
                ticket = completion.ticket,
                current = self.ticket,
                "Discarding stale completion"
            );
            return Settled::Stale {
                ticket: completion.ticket,
                current: self.ticket,
            };
        }

        match completion.result {
            Ok(value) => {
                info!(endpoint, ticket = completion.ticket, "Resolved");
                self.resource.resolve(value);
            }
            Err(e) => {
                warn!(endpoint, ticket = completion.ticket, error = %e, "Rejected");
                self.resource.reject(ViewError::Fetch(e));
            }
        }
        Settled::Applied(self.resource.phase())
    }
}

impl<E: Endpoint> Drop for EndpointData<E> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl<E: Endpoint> std::fmt::Debug for EndpointData<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointData")
            .field("endpoint", &self.endpoint.name())
            .field("phase", &self.resource.phase())
            .field("params", &self.params)
            .field("ticket", &self.ticket)
            .field("pending", &self.pending)
            .field("mounted", &self.mounted)
            .finish()
    }
}
