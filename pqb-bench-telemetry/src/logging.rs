//! ## pqb-bench-telemetry::logging
//! **Structured logging to stderr**
//!
//! Tool output (command scripts, manifests) goes to stdout and is usually
//! redirected into files, so every log line is written to stderr.

use tracing::{info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
    /// Calling this more than once is harmless.
    pub fn init(default_level: &str) {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Span wrapping one tool invocation.
    pub fn tool_span(tool: &'static str) -> Span {
        info_span!("pqb_bench", tool = tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn events_inside_tool_span_are_recorded() {
        let span = EventLogger::tool_span("compose");
        let _guard = span.enter();
        tracing::info!(services = 3, "Manifest rendered");
        assert!(logs_contain("Manifest rendered"));
        assert!(logs_contain("services=3"));
    }
}
