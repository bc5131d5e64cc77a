//! Subscriber setup for the CLI.
//!
//! Library crates only emit events; the binary decides where they go.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use typeschema::LogLevel;

/// Filter directive: `RUST_LOG` when set and non-empty, else the CLI level
pub fn directive(level: LogLevel, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => level.as_directive().to_string(),
    }
}

/// Install the global subscriber writing to stderr
pub fn init(level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = directive(level, rust_log.as_deref());

    // A malformed RUST_LOG falls back to the CLI level
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // Ignore error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}
