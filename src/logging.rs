//! Tracing subscriber setup.
//!
//! Filter priority is CLI > `RUST_LOG` > [`DEFAULT_LOG_FILTER`]. Output goes to
//! stdout as human-readable text or one JSON object per line.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, DEFAULT_LOG_FILTER};

/// Pick the filter directive: CLI flag first, then `RUST_LOG`, then the default.
pub fn log_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Formatting layer for `format`, writing to `writer`.
pub fn fmt_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .boxed(),
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init(format: LogFormat, filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt_layer(format, std::io::stdout))
        .init();
}
