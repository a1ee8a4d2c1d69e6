//! Per-platform sandbox and library-loading strategies
//!
//! Exactly one strategy is compiled in for the target OS and exported as
//! [`NativePlatform`]. The bootstrap only talks to the [`PlatformBootstrap`]
//! trait, so there is no platform branching in the core sequence.

use std::fmt;

use crate::args::ProcessArguments;
use crate::error::BootstrapError;

#[cfg(all(target_os = "macos", feature = "cef"))]
mod macos;
#[cfg(not(all(target_os = "macos", feature = "cef")))]
mod unsandboxed;

#[cfg(all(target_os = "macos", feature = "cef"))]
pub use macos::MacPlatform as NativePlatform;
#[cfg(not(all(target_os = "macos", feature = "cef")))]
pub use unsandboxed::UnsandboxedPlatform as NativePlatform;

/// Which flavour of the engine library a process needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderRole {
    /// The main application binary
    Main,
    /// A dedicated subprocess helper
    Helper,
}

impl LoaderRole {
    /// Only helpers enter the sandbox themselves; the browser process
    /// sandboxes the children it spawns instead
    pub fn enters_sandbox(self) -> bool {
        matches!(self, Self::Helper)
    }
}

/// Sets up the process before any engine code runs
pub trait PlatformBootstrap {
    /// Enter the OS sandbox. `Ok(None)` means there is no sandbox step for
    /// this platform and role.
    fn init_sandbox(
        &self,
        args: &ProcessArguments,
        role: LoaderRole,
    ) -> Result<Option<ScopedResource>, BootstrapError>;

    /// Load the engine library. `Ok(None)` means it is linked conventionally.
    fn load_library(&self, role: LoaderRole) -> Result<Option<ScopedResource>, BootstrapError>;
}

/// A process-scoped resource released when dropped
pub struct ScopedResource {
    name: &'static str,
    _inner: Box<dyn std::any::Any>,
}

impl ScopedResource {
    pub fn new<T: 'static>(name: &'static str, inner: T) -> Self {
        Self {
            name,
            _inner: Box::new(inner),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ScopedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedResource").field("name", &self.name).finish()
    }
}

impl Drop for ScopedResource {
    fn drop(&mut self) {
        tracing::debug!("Releasing {}", self.name);
    }
}

/// Resources acquired during process setup.
///
/// Fields drop in declaration order, so the library is released before the
/// sandbox context it was loaded under.
#[derive(Debug, Default)]
pub struct ProcessGuards {
    library: Option<ScopedResource>,
    sandbox: Option<ScopedResource>,
}

impl ProcessGuards {
    /// Run sandbox setup then library loading, stopping at the first failure.
    ///
    /// On failure anything already acquired is released before returning.
    pub fn acquire<P: PlatformBootstrap + ?Sized>(
        platform: &P,
        args: &ProcessArguments,
        role: LoaderRole,
    ) -> Result<Self, BootstrapError> {
        let mut guards = Self {
            sandbox: platform.init_sandbox(args, role)?,
            library: None,
        };
        if guards.sandbox.is_some() {
            tracing::info!("Sandbox initialized");
        }

        guards.library = platform.load_library(role)?;
        if guards.library.is_some() {
            tracing::info!("CEF library loaded ({:?})", role);
        }

        Ok(guards)
    }

    pub fn has_sandbox(&self) -> bool {
        self.sandbox.is_some()
    }

    pub fn has_library(&self) -> bool {
        self.library.is_some()
    }
}
