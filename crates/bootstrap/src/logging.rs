//! Tracing subscriber setup for Lumen binaries

use lumen_config::{BootstrapConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a stderr `fmt` subscriber filtered by `filter`.
///
/// Returns `false` if a subscriber was already installed. Never panics: a
/// process that cannot log must still be able to start and exit.
pub fn init(filter: &str) -> bool {
    let (env_filter, rejected) = env_filter(filter);
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    if let Some(e) = rejected {
        tracing::warn!("Invalid log filter {:?} ({}), using {:?}", filter, e, DEFAULT_LOG_FILTER);
    }
    installed
}

/// Read the environment, install logging with the configured filter, then
/// report every value that was rejected while reading it
pub fn init_from_env() -> BootstrapConfig {
    let (config, errors) = BootstrapConfig::load_env();
    init(&config.log_filter);
    for err in errors {
        tracing::warn!("Ignoring configuration value: {}", err);
    }
    config
}

/// An unparseable filter falls back to `info`; the parse error is handed back
/// so it can be logged once the subscriber is up
fn env_filter(filter: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    }
}
