//! # Endpoint Traits
//!
//! The boundary between a view and whatever answers its requests.
//!
//! - [`Endpoint`] is a named, read-only resource taking typed parameters.
//! - [`RemoteMethod`] is a named operation taking a row identifier and an
//!   optional type discriminator (e.g. removing a business hour).
//! - [`RemoteReply`] is the `{ success, data | error }` envelope servers answer
//!   with; [`RemoteReply::into_result`] folds it into a `Result`.
//!
//! # Architecture Note
//! Associated types keep every view honest about what it sends and receives:
//! a view over `Endpoint<Params = ListQuery>` cannot be handed a user lookup.

use crate::error::EndpointError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A fetchable resource.
///
/// Implementations must be cheap to share: the data source keeps one behind an
/// `Arc` and calls [`Endpoint::fetch`] from spawned tasks.
#[async_trait]
pub trait Endpoint: Send + Sync + 'static {
    /// Parameters identifying one request. Equality decides whether a
    /// parameter change triggers a refetch.
    type Params: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// The resolved value.
    type Output: Clone + Debug + Send + Sync + 'static;

    /// Resource name, used for logging (e.g. `users.info`).
    fn name(&self) -> &'static str;

    /// Perform one request.
    async fn fetch(&self, params: Self::Params) -> Result<Self::Output, EndpointError>;
}

/// A remote operation scoped to one row.
#[async_trait]
pub trait RemoteMethod: Send + Sync + 'static {
    /// Method name (e.g. `livechat:removeBusinessHour`).
    fn name(&self) -> &'static str;

    /// Invoke the method for `id`, optionally discriminated by `kind`.
    async fn call(&self, id: &str, kind: Option<&str>) -> Result<(), EndpointError>;
}

/// Reply envelope of the data source boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReply<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> RemoteReply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// A successful reply without data is treated as a remote error.
    pub fn into_result(self) -> Result<T, EndpointError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(EndpointError::Remote("reply carried no data".into())),
            (false, _) => Err(EndpointError::Remote(
                self.error.unwrap_or_else(|| "request failed".into()),
            )),
        }
    }
}
