//! [`Engine`] backed by the Chromium Embedded Framework
//!
//! CEF reads `argc`/`argv` itself through its main-args structure, so the
//! engine captures [`cef::args::Args`] once at construction. Those come from
//! the same OS argument vector as the [`ProcessArguments`] the bootstrap
//! passes in, which are only used here for diagnostics.

use cef::args::Args;
use cef::rc::Rc as _;
use cef::{api_hash, sys, wrap_app, App, ImplApp, Settings, WrapApp};
use std::ffi::c_int;

use crate::args::ProcessArguments;
use crate::engine::Engine;
use crate::settings::BrowserSettings;

/// Minimal CEF App; process-level handlers can be added here
#[derive(Clone)]
pub struct LumenCefApp;

wrap_app! {
    pub(crate) struct AppBuilder {
        app: LumenCefApp,
    }

    impl App {
        // Default browser/render process handlers are enough for OSR
    }
}

impl AppBuilder {
    pub fn build(app: LumenCefApp) -> App {
        Self::new(app)
    }
}

pub struct CefEngine {
    args: Args,
    app: App,
}

impl CefEngine {
    pub fn new() -> Self {
        // Validate CEF API version before any other CEF call
        let _ = api_hash(sys::CEF_API_VERSION_LAST, 0);

        Self {
            args: Args::new(),
            app: AppBuilder::build(LumenCefApp),
        }
    }
}

impl Default for CefEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for CefEngine {
    fn execute_sub_process(&mut self, args: &ProcessArguments) -> i32 {
        tracing::trace!("execute_process with {} arguments", args.len());
        let code = cef::execute_process(
            Some(self.args.as_main_args()),
            Some(&mut self.app),
            std::ptr::null_mut(),
        );
        tracing::debug!("execute_process returned: {}", code);
        code
    }

    fn initialize(&mut self, _args: &ProcessArguments, settings: &BrowserSettings) -> bool {
        let mut cef_settings = Settings::default();
        cef_settings.windowless_rendering_enabled = settings.windowless_rendering_enabled as c_int;
        cef_settings.no_sandbox = (!settings.sandbox_enabled) as c_int;
        cef_settings.external_message_pump = settings.external_message_pump as c_int;
        cef_settings.multi_threaded_message_loop = 0;
        cef_settings.root_cache_path = settings.root_cache_path_string().as_str().into();

        // Without a helper CEF re-executes this binary, which the bootstrap routes correctly
        if let Some(helper) = &settings.browser_subprocess_path {
            let helper_path = helper.to_string_lossy().into_owned();
            cef_settings.browser_subprocess_path = helper_path.as_str().into();
        }

        if let Ok(cef_path) = std::env::var("CEF_PATH") {
            tracing::info!("CEF_PATH: {}", cef_path);
        }

        let result = cef::initialize(
            Some(self.args.as_main_args()),
            Some(&cef_settings),
            Some(&mut self.app),
            std::ptr::null_mut(),
        );

        if result == 0 {
            tracing::error!("Failed to initialize CEF");
            return false;
        }
        true
    }

    fn shutdown(&mut self) {
        cef::shutdown();
    }

    fn exit_code(&self) -> i32 {
        cef::get_exit_code()
    }
}
