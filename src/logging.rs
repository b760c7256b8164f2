//! Native log setup. Session operations log through `tracing`; hosts pick
//! the sink.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `TIPJAR_LOG_JSON=1` selects JSON lines.
    pub fn from_env() -> Self {
        match std::env::var("TIPJAR_LOG_JSON").as_deref() {
            Ok("1") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the stderr subscriber; `RUST_LOG` filters, default `info`.
/// Later calls are no-ops.
pub fn init_logging() {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter("info"))
        .with_writer(std::io::stderr);
    let _ = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

/// Subscriber for test binaries: output captured per test, default `debug`.
pub fn init_test_logging() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter("tipjar=debug"))
        .with_test_writer()
        .try_init();
}
