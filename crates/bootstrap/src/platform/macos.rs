//! macOS: the CEF framework must be loaded at runtime rather than linked,
//! and sandboxed helpers enter the seatbelt sandbox before touching it.

use cef::library_loader::LibraryLoader;

use super::{LoaderRole, PlatformBootstrap, ScopedResource};
use crate::args::ProcessArguments;
use crate::error::BootstrapError;

#[derive(Debug, Default, Clone, Copy)]
pub struct MacPlatform;

impl PlatformBootstrap for MacPlatform {
    #[cfg(feature = "sandbox")]
    fn init_sandbox(
        &self,
        args: &ProcessArguments,
        role: LoaderRole,
    ) -> Result<Option<ScopedResource>, BootstrapError> {
        if !role.enters_sandbox() {
            tracing::debug!("Browser process does not enter the sandbox itself");
            return Ok(None);
        }
        sandbox::SandboxContext::initialize(args)
            .map(|ctx| Some(ScopedResource::new("sandbox context", ctx)))
    }

    #[cfg(not(feature = "sandbox"))]
    fn init_sandbox(
        &self,
        _args: &ProcessArguments,
        _role: LoaderRole,
    ) -> Result<Option<ScopedResource>, BootstrapError> {
        Ok(None)
    }

    fn load_library(&self, role: LoaderRole) -> Result<Option<ScopedResource>, BootstrapError> {
        let exe = std::env::current_exe()
            .map_err(|e| BootstrapError::LibraryLoad(format!("cannot locate executable: {e}")))?;

        let loader = LibraryLoader::new(&exe, role == LoaderRole::Helper);
        if !loader.load() {
            return Err(BootstrapError::LibraryLoad(format!(
                "CEF framework not found relative to {}",
                exe.display()
            )));
        }

        Ok(Some(ScopedResource::new("CEF library", loader)))
    }
}

/// The seatbelt entry points live in `libcef_sandbox.dylib` inside the
/// framework bundle, which is opened at runtime rather than linked.
#[cfg(feature = "sandbox")]
mod sandbox {
    use std::ffi::{c_char, c_int, c_void, CString};
    use std::path::PathBuf;
    use std::ptr::NonNull;

    use libloading::Library;

    use crate::args::ProcessArguments;
    use crate::error::BootstrapError;

    /// Relative to the helper executable inside `Contents/Frameworks/<Helper>.app/Contents/MacOS`
    const SANDBOX_LIBRARY_PATH: &str =
        "../../../Chromium Embedded Framework.framework/Libraries/libcef_sandbox.dylib";

    type InitializeFn = unsafe extern "C" fn(argc: c_int, argv: *mut *mut c_char) -> *mut c_void;
    type DestroyFn = unsafe extern "C" fn(context: *mut c_void);

    /// Live sandbox context; destroyed on drop, before the library is closed.
    pub(super) struct SandboxContext {
        context: NonNull<c_void>,
        destroy: DestroyFn,
        _argv: CArgv,
        _library: Library,
    }

    impl SandboxContext {
        pub(super) fn initialize(args: &ProcessArguments) -> Result<Self, BootstrapError> {
            let path = library_path()?;
            // Safety: loading the CEF sandbox library runs no initializers we depend on
            let library = unsafe { Library::new(&path) }.map_err(|e| {
                BootstrapError::Sandbox(format!("cannot open {}: {e}", path.display()))
            })?;

            // Safety: both signatures match cef_sandbox_mac.h
            let (initialize, destroy) = unsafe {
                let initialize = *library
                    .get::<InitializeFn>("cef_sandbox_initialize")
                    .map_err(|e| BootstrapError::Sandbox(format!("missing symbol: {e}")))?;
                let destroy = *library
                    .get::<DestroyFn>("cef_sandbox_destroy")
                    .map_err(|e| BootstrapError::Sandbox(format!("missing symbol: {e}")))?;
                (initialize, destroy)
            };

            let mut argv = CArgv::new(args)?;
            // Safety: argv outlives the call and is NULL-terminated
            let raw = unsafe { initialize(argv.argc(), argv.as_mut_ptr()) };
            let context = NonNull::new(raw).ok_or_else(|| {
                BootstrapError::Sandbox("cef_sandbox_initialize returned no context".into())
            })?;

            Ok(Self {
                context,
                destroy,
                _argv: argv,
                _library: library,
            })
        }
    }

    impl Drop for SandboxContext {
        fn drop(&mut self) {
            // Safety: context came from cef_sandbox_initialize and the library is still open
            unsafe { (self.destroy)(self.context.as_ptr()) };
        }
    }

    /// Resolve against the executable's directory so a symlinked helper still works
    fn library_path() -> Result<PathBuf, BootstrapError> {
        let exe = std::env::current_exe()
            .map_err(|e| BootstrapError::Sandbox(format!("cannot locate executable: {e}")))?;
        let dir = exe.parent().ok_or_else(|| {
            BootstrapError::Sandbox(format!("{} has no parent directory", exe.display()))
        })?;
        let candidate = dir.join(SANDBOX_LIBRARY_PATH);
        candidate.canonicalize().map_err(|e| {
            BootstrapError::Sandbox(format!("sandbox library not found at {}: {e}", candidate.display()))
        })
    }

    /// NULL-terminated C argument vector
    struct CArgv {
        _owned: Vec<CString>,
        ptrs: Vec<*mut c_char>,
    }

    impl CArgv {
        fn new(args: &ProcessArguments) -> Result<Self, BootstrapError> {
            let owned = args
                .as_slice()
                .iter()
                .map(|a| CString::new(a.as_str()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BootstrapError::Sandbox(format!("argument contains NUL: {e}")))?;
            let mut ptrs: Vec<*mut c_char> =
                owned.iter().map(|s| s.as_ptr() as *mut c_char).collect();
            ptrs.push(std::ptr::null_mut());
            Ok(Self {
                _owned: owned,
                ptrs,
            })
        }

        fn argc(&self) -> c_int {
            (self.ptrs.len() - 1) as c_int
        }

        fn as_mut_ptr(&mut self) -> *mut *mut c_char {
            self.ptrs.as_mut_ptr()
        }
    }
}
