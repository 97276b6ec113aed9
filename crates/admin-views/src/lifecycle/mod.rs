//! # Console Lifecycle
//!
//! Starting, wiring and stopping the admin views.
//!
//! ## The AdminConsole Pattern
//!
//! [`AdminConsole`] is the conductor. At start-up it mounts the views that are
//! always on screen (the business hours table and the agent status chart) and
//! builds the read-only registries. Screens opened later (user info, add and
//! edit user) are mounted on demand and tracked so shutdown can stop them.
//!
//! ```rust,ignore
//! let (context, routes, toasts) = ViewContext::recording(catalog, config.settings.clone());
//! let mut console = AdminConsole::new(api, context, &config, range)?;
//!
//! console.business_hours.filter("support".into()).await?;
//! let editor = console.open_edit_user("u1");
//! editor.settled().await?;
//!
//! console.shutdown().await?;
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Views are built without collaborators. The translator, navigator, toast
//! sink and settings arrive as the shared [`ViewContext`](crate::context::ViewContext)
//! when each actor starts running.
//!
//! ## Graceful Shutdown
//!
//! 1. **Unmount every view** - clients may have been cloned by callers, so
//!    dropping the console's copies is not enough.
//! 2. **Views clean up** - `on_unmount` aborts in-flight fetches.
//! 3. **Await completion** - wait for every view task to finish.
//!
//! ## Configuration
//!
//! See [`config`] for the TOML file and its defaults.

pub mod config;
pub mod console;

pub use config::{ConsoleConfig, UiSettings, ViewsConfig, CONFIG_ENV};
pub use console::*;
