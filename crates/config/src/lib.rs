//! Shared configuration for Lumen
//!
//! This crate is the single source of truth for the bootstrap settings used
//! by both the main binary and the CEF subprocess helper: where the engine
//! cache lives, whether sandboxing and windowless rendering are enabled, and
//! how the host pumps the engine's message loop.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default cache directory, resolved against the working directory
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default interval between host message-loop pumps (~60 Hz)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Environment variable names
pub mod env {
    pub const CACHE_DIR: &str = "LUMEN_CACHE_DIR";
    pub const SANDBOX: &str = "LUMEN_SANDBOX";
    pub const WINDOWLESS: &str = "LUMEN_WINDOWLESS";
    pub const EXTERNAL_PUMP: &str = "LUMEN_EXTERNAL_PUMP";
    pub const HELPER_PATH: &str = "CEF_HELPER_PATH";
    pub const LOG: &str = "LUMEN_LOG";
    pub const FRAME_INTERVAL_MS: &str = "LUMEN_FRAME_INTERVAL_MS";
}

/// Errors raised while reading configuration values
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than 1/0, true/false, yes/no, on/off
    #[error("{key}: expected a boolean, got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    /// A numeric variable could not be parsed
    #[error("{key}: expected a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// A path variable was set but empty
    #[error("{key}: path must not be empty")]
    EmptyPath { key: &'static str },
}

/// Whether CEF should sandbox its own subprocesses when nothing overrides it.
///
/// Only macOS builds with the `sandbox` feature set up the helper-side
/// sandbox, so that is the only combination where enabling it is safe.
pub const fn default_sandbox_enabled() -> bool {
    cfg!(all(feature = "sandbox", target_os = "macos"))
}

/// Bootstrap configuration for one process instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Root cache directory; relative paths are resolved against the working directory
    pub cache_dir: PathBuf,
    /// Whether CEF sandboxes the subprocesses it spawns
    pub sandbox: bool,
    /// Off-screen rendering (the host composites the pixel buffers itself)
    pub windowless: bool,
    /// The host pumps CEF work itself instead of handing the thread to CEF
    pub external_message_pump: bool,
    /// Explicit subprocess helper binary
    pub helper_path: Option<PathBuf>,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
    /// Interval between message-loop pumps
    pub frame_interval_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            sandbox: default_sandbox_enabled(),
            windowless: true,
            external_message_pump: true,
            helper_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl BootstrapConfig {
    /// Read configuration from the process environment.
    ///
    /// A malformed variable keeps its default and is handed back instead of
    /// failing: subprocesses read the same environment and must not die over
    /// a typo meant for the host. Callers log the rejected values once logging
    /// is installed.
    pub fn load_env() -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let errors = config.apply(|key: &str| std::env::var(key).ok());
        (config, errors)
    }

    /// Strict variant of [`load_env`](Self::load_env) driven by an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        match config.apply(lookup).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }

    /// Overlay every variable `lookup` knows about, collecting the bad ones
    fn apply<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        match non_empty_path(env::CACHE_DIR, lookup(env::CACHE_DIR)) {
            Ok(Some(path)) => self.cache_dir = path,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }

        for (key, slot) in [
            (env::SANDBOX, &mut self.sandbox),
            (env::WINDOWLESS, &mut self.windowless),
            (env::EXTERNAL_PUMP, &mut self.external_message_pump),
        ] {
            if let Some(raw) = lookup(key) {
                match parse_bool(key, &raw) {
                    Ok(value) => *slot = value,
                    Err(e) => errors.push(e),
                }
            }
        }

        match non_empty_path(env::HELPER_PATH, lookup(env::HELPER_PATH)) {
            Ok(path @ Some(_)) => self.helper_path = path,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }

        if let Some(filter) = lookup(env::LOG).filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }

        if let Some(raw) = lookup(env::FRAME_INTERVAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.frame_interval_ms = ms,
                Err(_) => errors.push(ConfigError::InvalidNumber {
                    key: env::FRAME_INTERVAL_MS,
                    value: raw,
                }),
            }
        }

        errors
    }

    /// Interval between message-loop pumps as a `Duration`
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}

fn non_empty_path(key: &'static str, raw: Option<String>) -> Result<Option<PathBuf>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Err(ConfigError::EmptyPath { key }),
        Some(s) => Ok(Some(PathBuf::from(s))),
    }
}
