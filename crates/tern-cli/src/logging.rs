//! Logging setup for the `tern` binary.
//!
//! The parser library only emits events; the binary decides where they go.
//! Everything is written to stderr so stdout stays a clean JSON document.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets raised by the `-v` flag.
const TARGETS: [&str; 2] = ["tern", "tern_parser"];

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` sets the base filter (default `warn`). Each `-v` raises the
/// crate targets one level. With `json`, events are written as JSON lines.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init(verbosity: u8, json: bool) {
    let level = level_for(verbosity);
    let filter = TARGETS.iter().fold(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        |filter, target| match format!("{target}={level}").parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        },
    );

    let registry = tracing_subscriber::registry().with(filter);
    let stderr = std::io::stderr;

    if json {
        registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false).with_writer(stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_target(false).with_writer(stderr)).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), Level::INFO);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(2), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }
}
