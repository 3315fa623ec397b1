//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;
use crate::error::SourceError;

/// Install the global tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to `info`.
pub fn init(format: LogFormat) -> Result<(), SourceError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| SourceError::Telemetry(e.to_string()))
}
