// --- File: crates/smsify_common/src/logging.rs ---
//! Logging utilities for the Smsify application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the Smsify application. It wraps the tracing subscriber setup so every
//! entry point configures logging the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// `RUST_LOG` takes precedence when set.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display when `RUST_LOG` is unset.
pub fn init_with_level(level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
