//! # Observability & Tracing
//!
//! [`setup_tracing`] initialises structured logging for a process built on these stores.
//!
//! Stores log with an `entity_type` field (e.g. `entity_type="User"`), so module paths are
//! hidden (`with_target(false)`) and the compact format keeps span names inline.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Saved / Deleted lines with ids and store sizes
//! RUST_LOG=debug cargo run     # Every request, including saved payloads
//! ```
//!
//! A store emits:
//! - `Store started` / `Shutdown` with the final size;
//! - `Saved`, `Deleted` at `info`;
//! - `FindAll`, `FindById`, `ExistsById`, `Save` payloads at `debug`;
//! - `Save failed`, `on_delete refused`, `Not found` at `warn`.

/// Installs a global compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling it twice in one process is a no-op for the second call.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
