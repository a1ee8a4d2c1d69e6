//! The start-up sequence shared by every Lumen process
//!
//! ```text
//! sandbox -> library -> role dispatch -+-> subprocess: exit with engine's code
//!                                      +-> browser: settings -> init -> app.run -> shutdown
//! ```
//!
//! Both entry points return the process exit status. Scoped resources are
//! released before they return, so callers can hand the status straight to
//! `std::process::exit`.

use crate::args::ProcessArguments;
use crate::dispatch::{dispatch, Dispatch};
use crate::engine::Engine;
use crate::error::{BootstrapError, EXIT_PLATFORM_FAILURE};
use crate::lifecycle::{HostApplication, HostLifecycle};
use crate::platform::{LoaderRole, PlatformBootstrap, ProcessGuards};
use crate::settings::BrowserSettingsBuilder;

/// Entry point for the main binary, which may also be re-executed as a subprocess
///
/// `make_engine` runs only after platform setup, so no engine code (not even
/// construction) happens before the sandbox and library are in place.
pub fn run_main<P, E, G, A, F>(
    platform: &P,
    make_engine: G,
    args: &ProcessArguments,
    settings: BrowserSettingsBuilder,
    make_app: F,
) -> i32
where
    P: PlatformBootstrap + ?Sized,
    E: Engine,
    G: FnOnce() -> E,
    A: HostApplication,
    F: FnOnce() -> A,
{
    let _guards = match ProcessGuards::acquire(platform, args, LoaderRole::Main) {
        Ok(guards) => guards,
        Err(e) => return fatal(e),
    };
    let mut engine = make_engine();

    if let Dispatch::SubProcessExited(code) = dispatch(&mut engine, args) {
        return code;
    }

    let settings = match settings.build() {
        Ok(settings) => settings,
        Err(e) => return fatal(e),
    };
    tracing::info!(
        "Starting CEF browser process (windowless: {}, sandbox: {}, cache: {})",
        settings.windowless_rendering_enabled,
        settings.sandbox_enabled,
        settings.root_cache_path.display()
    );

    let mut lifecycle = HostLifecycle::new(engine);
    match lifecycle.run(args, &settings, make_app) {
        Ok(()) => 0,
        Err(BootstrapError::EngineInit { code }) => {
            tracing::info!("CEF browser process exited with code: {}", code);
            code
        }
        Err(e) => fatal(e),
    }
}

/// Entry point for the dedicated subprocess helper binary
pub fn run_helper<P, E, G>(platform: &P, make_engine: G, args: &ProcessArguments) -> i32
where
    P: PlatformBootstrap + ?Sized,
    E: Engine,
    G: FnOnce() -> E,
{
    let _guards = match ProcessGuards::acquire(platform, args, LoaderRole::Helper) {
        Ok(guards) => guards,
        Err(e) => return fatal(e),
    };
    let mut engine = make_engine();

    match dispatch(&mut engine, args) {
        Dispatch::SubProcessExited(code) => code,
        Dispatch::MainProcess => {
            tracing::error!("Helper binary launched without a subprocess role");
            EXIT_PLATFORM_FAILURE
        }
    }
}

fn fatal(err: BootstrapError) -> i32 {
    tracing::error!("{}", err);
    err.exit_code()
}
