//! Multi-process bootstrap for the Lumen off-screen CEF host
//!
//! CEF spawns its renderer, GPU and utility processes by re-executing a
//! binary with internal flags. Every one of those processes, and the main
//! application itself, starts here:
//!
//! 1. [`platform`] enters the OS sandbox and loads the CEF library where the
//!    platform requires it.
//! 2. [`dispatch`] lets CEF claim the process if it is a subprocess; its exit
//!    code becomes the process status.
//! 3. Otherwise [`settings`] builds the browser settings (creating the cache
//!    directory) and [`lifecycle`] runs init -> application -> shutdown.
//!
//! [`bootstrap::run_main`] and [`bootstrap::run_helper`] wire these together.
//! The CEF-backed engine lives behind the `cef` feature so the sequence can be
//! built and tested without the CEF binaries.
//!
//! # References
//!
//! - CEF general usage: https://bitbucket.org/chromiumembedded/cef/wiki/GeneralUsage
//! - Separate subprocess executable: https://bitbucket.org/chromiumembedded/cef/wiki/GeneralUsage#markdown-header-separate-sub-process-executable

pub mod args;
pub mod bootstrap;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod helper;
pub mod lifecycle;
pub mod logging;
pub mod platform;
pub mod settings;

#[cfg(feature = "cef")]
pub mod cef_engine;

#[cfg(test)]
pub(crate) mod testing;

pub use args::{ProcessArguments, ProcessRole, SubProcessKind};
pub use bootstrap::{run_helper, run_main};
pub use dispatch::Dispatch;
pub use engine::Engine;
pub use error::BootstrapError;
pub use lifecycle::{HostApplication, HostLifecycle, LifecycleState};
pub use platform::{LoaderRole, NativePlatform, PlatformBootstrap};
pub use settings::{BrowserSettings, BrowserSettingsBuilder};

#[cfg(feature = "cef")]
pub use cef_engine::CefEngine;
