//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **View lifecycle**: mount, unmount, failed events (`view_type` field)
//! - **Fetches**: start at `debug`, resolution at `info`, rejection at `warn`,
//!   stale completions at `debug` (`endpoint`, `ticket` fields)
//! - **Row actions**: start, cancel, outcome (`row_id` field)
//! - **Saves**: primary update and secondary upload outcomes
//!
//! ```bash
//! RUST_LOG=info cargo run -p admin-views
//! RUST_LOG=view_framework=debug cargo run -p admin-views
//! ```

/// Initialises the global subscriber. Call once, from a binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // view_type and endpoint fields identify the source
        .compact()
        .init();
}
