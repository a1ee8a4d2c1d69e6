//! Linux and Windows: CEF is linked normally and the host sets up no sandbox
//! of its own (on Linux CEF's zygote handles sandboxing internally).

use super::{LoaderRole, PlatformBootstrap, ScopedResource};
use crate::args::ProcessArguments;
use crate::error::BootstrapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsandboxedPlatform;

impl PlatformBootstrap for UnsandboxedPlatform {
    fn init_sandbox(
        &self,
        _args: &ProcessArguments,
        _role: LoaderRole,
    ) -> Result<Option<ScopedResource>, BootstrapError> {
        Ok(None)
    }

    fn load_library(&self, _role: LoaderRole) -> Result<Option<ScopedResource>, BootstrapError> {
        Ok(None)
    }
}
