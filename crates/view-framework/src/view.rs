//! # View Trait
//!
//! The contract a screen implements so a [`ViewActor`](crate::ViewActor) can
//! host it. A view owns its data sources, drafts and row actions; the actor
//! feeds it events, awaits its fetches and asks it for snapshots.

use crate::error::ViewError;
use async_trait::async_trait;
use std::fmt::Debug;

/// A headless screen.
///
/// # Associated Types
///
/// * `Event` - user input the view reacts to (edits, clicks, confirmations).
/// * `Snapshot` - plain data a renderer draws from. Taking a snapshot never
///   mutates the view.
/// * `Context` - collaborators injected at `run` time: translator, navigator,
///   toast sink, settings.
///
/// # Settling
///
/// [`View::settle`] awaits the next completion of any in-flight fetch and
/// applies it. The actor races it against incoming requests, so it must be
/// cancel safe: a completion is either fully applied or still queued.
#[async_trait]
pub trait View: Send + 'static {
    type Event: Debug + Send + 'static;
    type Snapshot: Clone + Debug + Send + 'static;
    type Context: Send + Sync + 'static;

    /// Called once before the first request. Typically starts the initial fetch.
    async fn on_mount(&mut self, _ctx: &Self::Context) -> Result<(), ViewError> {
        Ok(())
    }

    async fn handle_event(&mut self, event: Self::Event, ctx: &Self::Context)
        -> Result<(), ViewError>;

    /// True while some fetch has not reported back.
    fn has_pending(&self) -> bool;

    /// Applies one completion. Returns `true` if it changed what the view shows.
    async fn settle(&mut self, ctx: &Self::Context) -> bool;

    fn snapshot(&self, ctx: &Self::Context) -> Self::Snapshot;

    /// Called once when the view stops. Must unmount every data source.
    fn on_unmount(&mut self) {}
}
