//! Error types for the bootstrap sequence

use std::path::PathBuf;

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Exit status for a failed sandbox or library load
pub const EXIT_PLATFORM_FAILURE: i32 = 1;

/// Exit status when the cache directory cannot be created
pub const EXIT_CACHE_DIRECTORY_FAILURE: i32 = 2;

/// Exit status for a bootstrap bug such as an out-of-order lifecycle step
/// (`EX_SOFTWARE` from sysexits.h)
pub const EXIT_INTERNAL_FAILURE: i32 = 70;

/// Fatal bootstrap failures. None of these are ever retried: each one happens
/// after some process-wide setup that cannot safely be repeated.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to initialize sandbox: {0}")]
    Sandbox(String),

    #[error("Failed to load CEF library: {0}")]
    LibraryLoad(String),

    #[error("CEF initialization failed with exit code {code}")]
    EngineInit { code: i32 },

    #[error("Failed to create cache directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl BootstrapError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sandbox(_) | Self::LibraryLoad(_) => EXIT_PLATFORM_FAILURE,
            Self::EngineInit { code } => *code,
            Self::DirectoryCreation { .. } => EXIT_CACHE_DIRECTORY_FAILURE,
            Self::InvalidTransition { .. } => EXIT_INTERNAL_FAILURE,
        }
    }
}
