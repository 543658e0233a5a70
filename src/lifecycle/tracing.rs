//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole
//! application.
//!
//! ## Configuration
//!
//! Verbosity is controlled through the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=mini_shop::repository=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Repository lifecycle**: startup, every load-mutate-save cycle, shutdown
//! - **Service operations**: registrations, logins, stock and balance moves
//! - **The order workflow**: hierarchical spans from `create_order` down to
//!   the three collection saves it triggers

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - record_type says it already
        .compact() // Compact format shows spans inline
        .init();
}
