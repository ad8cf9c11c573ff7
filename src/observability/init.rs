//! Tracing initialization and subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Initializes the tracing subscriber.
///
/// Spans and events go to stderr so they never interleave with the
/// companion's stdout output.
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. The `SLEEPBUNNY_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times (only the first call takes
/// effect).
///
/// # Example
///
/// ```rust
/// use sleepbunny::observability::init_tracing;
/// use sleepbunny::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = std::env::var("SLEEPBUNNY_LOG")
        .ok()
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let _ = subscriber.try_init();
}
