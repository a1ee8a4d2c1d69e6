//! Lumen - off-screen CEF host
//!
//! This binary is both the browser process and, when CEF re-executes it
//! without a dedicated helper, every subprocess. The bootstrap decides which
//! one it is before any host state exists.

#[cfg_attr(not(feature = "cef"), allow(dead_code))]
mod host;

use lumen_bootstrap::ProcessArguments;

#[cfg(feature = "cef")]
fn main() {
    use host::OffscreenHost;
    use lumen_bootstrap::{BrowserSettingsBuilder, CefEngine, NativePlatform};

    let config = lumen_bootstrap::logging::init_from_env();
    let args = ProcessArguments::from_env();
    tracing::debug!("Starting Lumen as {} process", args.role());

    let settings = BrowserSettingsBuilder::from_config(&config).discover_helper(true);
    let frame_interval = config.frame_interval();

    let exit_code = lumen_bootstrap::run_main(
        &NativePlatform,
        CefEngine::new,
        &args,
        settings,
        || OffscreenHost::new(cef::do_message_loop_work, frame_interval),
    );

    std::process::exit(exit_code);
}

#[cfg(not(feature = "cef"))]
fn main() {
    lumen_bootstrap::logging::init_from_env();
    let args = ProcessArguments::from_env();
    tracing::error!(
        "Lumen was built without the `cef` feature; cannot start as {} process",
        args.role()
    );
    std::process::exit(1);
}
