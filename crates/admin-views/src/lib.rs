//! # Admin Views
//!
//! The admin screens of the team chat client, built on `view_framework`.
//!
//! - **[model]**: data shapes exchanged with the server.
//! - **[api]**: the [`AdminApi`](api::AdminApi) surface and its endpoint adapters.
//! - **[views]**: the screens, each a [`View`](view_framework::View) or a plain presenter.
//! - **[clients]**: typed handles of the mounted views.
//! - **[lifecycle]**: configuration and the [`AdminConsole`](lifecycle::AdminConsole) orchestrator.
//! - **[in_memory]**: an [`AdminApi`](api::AdminApi) over plain collections, for the demo and tests.

pub mod api;
pub mod clients;
pub mod context;
pub mod error;
pub mod in_memory;
pub mod lifecycle;
pub mod message_types;
pub mod model;
pub mod room_icon;
pub mod views;
