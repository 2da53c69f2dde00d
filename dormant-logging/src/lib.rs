// Copyright (c) 2021 MASSA LABS <info@massa.net>
//! Logging helpers shared by every dormant crate.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

/// Emit a structured trace event: an event name followed by a JSON payload.
#[macro_export]
macro_rules! dormant_trace {
    ($evt:expr, $params:tt) => {
        tracing::trace!("dormant_trace:{}:{}", $evt, serde_json::json!($params));
    };
}

/// Map the numeric level of the configuration file to a tracing level.
/// 0 is errors only, 4 and above is everything.
pub fn level_filter(level: usize) -> LevelFilter {
    match level {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Calling it more than once is harmless: only the first call installs a subscriber.
pub fn setup_logging(level: usize) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy();
    let tracing_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(filter);
    let _ = tracing_subscriber::registry().with(tracing_layer).try_init();
}
