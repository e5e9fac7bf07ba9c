//! Observability module for structured logging.
//!
//! Installs a `tracing-subscriber` filtered by `RUST_LOG` or the configured
//! level, emitting JSON lines or pretty text.

mod tracing;

pub use self::tracing::{LOG_TARGET, TracingError, build_filter, init_tracing};
