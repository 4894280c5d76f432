//! Tracing subscriber setup.

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

use crate::config::{LogFormat, ServerConfig};

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `server.log_level`; an unparsable level falls back
/// to `info`.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt = tracing_subscriber::fmt::layer().with_target(true);
    let fmt = match config.log_format {
        LogFormat::Pretty => fmt.compact().boxed(),
        LogFormat::Json => fmt.json().with_current_span(false).boxed(),
    };

    tracing_subscriber::registry().with(filter).with(fmt).try_init()
}
