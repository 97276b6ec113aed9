//! # View Framework
//!
//! Building blocks for headless list/detail views that bind to remote data.
//! A view fetches a resource, hydrates an editable draft from it, renders rows
//! or fields, and forwards edits and actions upstream. The rendering toolkit,
//! the transport and the localisation catalogue stay outside; this crate only
//! owns the contract between a view and its data.
//!
//! ## Core Concepts
//!
//! - **Data source** ([`EndpointData`]): fetches through an [`Endpoint`] and
//!   exposes a [`RemoteResource`] with an [`AsyncPhase`]. Every fetch carries a
//!   ticket; completions for superseded tickets are discarded.
//! - **Form state** ([`FormDraft`]): a draft derived from a snapshot, with
//!   per-field handlers, dirty tracking and reset.
//! - **Tables** ([`TablePresenter`], [`ListQuery`], [`Page`]): renders one page
//!   and turns query edits into new queries. It never fetches.
//! - **Row actions** ([`RowAction`]): `Idle -> ConfirmPending -> Executing -> Idle`.
//! - **Detail forms** ([`DetailForm`]): atomic save with an optional secondary
//!   upload committed after the primary update.
//! - **Registry** ([`Registry`]): a typed table populated once at start-up.
//!
//! ## Concurrency Model
//!
//! Each view instance runs inside a [`ViewActor`] task and exclusively owns its
//! state, so no locks guard drafts or resources. Requests arrive through a
//! [`ViewHandle`]; fetch completions are awaited by the same loop. Unmounting a
//! view aborts its in-flight fetches and turns late completions into no-ops.
//!
//! ## Testing
//!
//! See the [`mock`] module for [`mock::MockEndpoint`] and [`mock::MockMethod`].

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod detail;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod i18n;
pub mod list;
pub mod message;
pub mod mock;
pub mod registry;
pub mod resource;
pub mod route;
pub mod row_action;
pub mod source;
pub mod toast;
pub mod tracing;
pub mod view;

// Re-export core types for convenience
pub use actor::ViewActor;
pub use client::ViewHandle;
pub use client_trait::ViewClient;
pub use detail::{DetailForm, SaveReceipt, SaveReport, SecondaryUpload, Submit, UploadStatus};
pub use endpoint::{Endpoint, RemoteMethod, RemoteReply};
pub use error::{EndpointError, ViewError};
pub use form::{FieldKind, FieldValue, FormDraft, FormValues};
pub use i18n::{Catalog, Translate};
pub use list::{Column, ListQuery, Page, QueryEdit, RowRenderer, TableModel, TablePresenter};
pub use message::{Response, ViewRequest};
pub use registry::{Registry, RegistryBuilder};
pub use resource::{AsyncPhase, RemoteResource};
pub use route::{Navigator, Route, RouteLog};
pub use row_action::{Gate, RowAction, RowActionState, RowTarget};
pub use source::{EndpointData, Settled};
pub use toast::{Toast, ToastKind, ToastLog, ToastSink};
pub use view::View;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
