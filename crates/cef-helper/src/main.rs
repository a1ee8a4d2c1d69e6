//! CEF subprocess helper binary
//!
//! CEF spawns renderer, GPU and utility processes. By default it re-executes
//! the main binary with different command line arguments; pointing it at this
//! helper instead keeps the host application's start-up work out of those
//! processes.
//!
//! The helper runs the same platform setup as the main binary (sandbox, then
//! library load in helper mode), hands the arguments to CEF, and exits with
//! whatever CEF returns. Launched without a subprocess role it exits with 1.

use lumen_bootstrap::{CefEngine, NativePlatform, ProcessArguments};

fn main() {
    lumen_bootstrap::logging::init_from_env();

    let args = ProcessArguments::from_env();
    let exit_code = lumen_bootstrap::run_helper(&NativePlatform, CefEngine::new, &args);

    std::process::exit(exit_code);
}
