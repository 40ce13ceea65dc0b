//! # Observability & Tracing
//!
//! Structured logging for the whole system, driven by the `RUST_LOG`
//! environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run      # compact workflow logs
//! RUST_LOG=debug cargo run     # full request/response payloads
//! ```
//!
//! What gets traced:
//! - actor lifecycle (startup, shutdown);
//! - every activation with its generation, and stale results being discarded;
//! - upstream requests (endpoint + URL at debug);
//! - order submissions and their outcomes.

/// Initializes the global tracing subscriber. Call once at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - the fields carry the context
        .compact() // Compact format shows spans inline
        .init();
}
