//! # ViewClient Trait
//!
//! Common interface for screen-specific clients, adding default `snapshot`,
//! `settled` and `unmount` methods on top of a generic [`ViewHandle`].

use crate::{View, ViewError, ViewHandle};
use async_trait::async_trait;

/// Trait for screen-specific clients to inherit the standard view requests.
///
/// # Example
///
/// ```rust,ignore
/// pub struct UserInfoClient {
///     inner: ViewHandle<UserInfoView<Lookup>>,
/// }
///
/// #[async_trait]
/// impl ViewClient<UserInfoView<Lookup>> for UserInfoClient {
///     type Error = AdminError;
///
///     fn inner(&self) -> &ViewHandle<UserInfoView<Lookup>> {
///         &self.inner
///     }
///
///     fn map_error(e: ViewError) -> Self::Error {
///         AdminError::View(e)
///     }
/// }
///
/// // snapshot(), settled() and unmount() are provided automatically
/// let props = client.settled().await?;
/// ```
#[async_trait]
pub trait ViewClient<V: View>: Send + Sync {
    /// The screen-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic handle.
    fn inner(&self) -> &ViewHandle<V>;

    /// Map framework errors to the screen-specific error type.
    fn map_error(e: ViewError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<V::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Snapshot once every in-flight fetch has been applied.
    #[tracing::instrument(skip(self))]
    async fn settled(&self) -> Result<V::Snapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().settled().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn unmount(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().unmount().await.map_err(Self::map_error)
    }
}
