//! Scripted collaborators for unit tests
//!
//! Every mock writes to a shared [`Journal`] so tests can assert the exact
//! order in which the bootstrap touched the platform, engine and application.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::args::ProcessArguments;
use crate::engine::{Engine, NOT_A_SUBPROCESS};
use crate::error::BootstrapError;
use crate::lifecycle::HostApplication;
use crate::platform::{LoaderRole, PlatformBootstrap, ScopedResource};
use crate::settings::BrowserSettings;

/// Ordered record of collaborator calls
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.borrow().iter().any(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }
}

/// Records `entry` when dropped
pub struct Tracked {
    journal: Journal,
    entry: &'static str,
}

impl Tracked {
    pub fn new(journal: &Journal, entry: &'static str) -> Self {
        Self {
            journal: journal.clone(),
            entry,
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.journal.record(self.entry);
    }
}

pub struct MockPlatform {
    journal: Journal,
    scoped: bool,
    sandbox_fails: bool,
    library_fails: bool,
}

impl MockPlatform {
    /// Both steps are called but acquire nothing (like an unsandboxed OS)
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            scoped: false,
            sandbox_fails: false,
            library_fails: false,
        }
    }

    /// Both steps hand back resources that record their release
    pub fn sandboxed(journal: &Journal) -> Self {
        Self {
            scoped: true,
            ..Self::new(journal)
        }
    }

    pub fn failing_sandbox(mut self) -> Self {
        self.sandbox_fails = true;
        self
    }

    pub fn failing_library(mut self) -> Self {
        self.library_fails = true;
        self
    }
}

impl PlatformBootstrap for MockPlatform {
    fn init_sandbox(
        &self,
        _args: &ProcessArguments,
        role: LoaderRole,
    ) -> Result<Option<ScopedResource>, BootstrapError> {
        self.journal.record(match role {
            LoaderRole::Main => "sandbox.init",
            LoaderRole::Helper => "sandbox.init:helper",
        });
        if self.sandbox_fails {
            return Err(BootstrapError::Sandbox("mock sandbox refused".into()));
        }
        Ok(self.scoped.then(|| {
            ScopedResource::new("sandbox", Tracked::new(&self.journal, "sandbox.release"))
        }))
    }

    fn load_library(&self, role: LoaderRole) -> Result<Option<ScopedResource>, BootstrapError> {
        self.journal.record(match role {
            LoaderRole::Main => "library.load",
            LoaderRole::Helper => "library.load:helper",
        });
        if self.library_fails {
            return Err(BootstrapError::LibraryLoad("mock library missing".into()));
        }
        Ok(self.scoped.then(|| {
            ScopedResource::new("library", Tracked::new(&self.journal, "library.release"))
        }))
    }
}

/// Observes engine state after the engine has been moved into the bootstrap
#[derive(Debug, Clone, Default)]
pub struct InitObserver(Rc<Cell<Option<bool>>>);

impl InitObserver {
    /// Whether the cache directory existed when `initialize` ran
    pub fn cache_existed_at_init(&self) -> Option<bool> {
        self.0.get()
    }
}

pub struct MockEngine {
    journal: Journal,
    /// `None` classifies by the `--type=` flag; `Some` forces the result
    sub_process_code: Option<Option<i32>>,
    init_failure: Option<i32>,
    initialize_calls: usize,
    shutdown_calls: usize,
    observer: InitObserver,
}

impl MockEngine {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            sub_process_code: None,
            init_failure: None,
            initialize_calls: 0,
            shutdown_calls: 0,
            observer: InitObserver::default(),
        }
    }

    /// Force the subprocess result: `Some(code)` is a subprocess, `None` the browser
    pub fn with_sub_process_code(mut self, code: Option<i32>) -> Self {
        self.sub_process_code = Some(code);
        self
    }

    pub fn failing_init(mut self, exit_code: i32) -> Self {
        self.init_failure = Some(exit_code);
        self
    }

    pub fn observer(&self) -> InitObserver {
        self.observer.clone()
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls
    }
}

impl Engine for MockEngine {
    fn execute_sub_process(&mut self, args: &ProcessArguments) -> i32 {
        self.journal.record("engine.execute_sub_process");
        let code = match self.sub_process_code {
            Some(forced) => forced,
            None => args.process_type().map(|_| 0),
        };
        code.unwrap_or(NOT_A_SUBPROCESS)
    }

    fn initialize(&mut self, _args: &ProcessArguments, settings: &BrowserSettings) -> bool {
        self.journal.record("engine.initialize");
        self.initialize_calls += 1;
        self.observer.0.set(Some(settings.root_cache_path.is_dir()));
        self.init_failure.is_none()
    }

    fn shutdown(&mut self) {
        self.journal.record("engine.shutdown");
        self.shutdown_calls += 1;
    }

    fn exit_code(&self) -> i32 {
        self.init_failure.unwrap_or(0)
    }
}

pub struct MockApplication {
    journal: Journal,
}

impl MockApplication {
    pub fn new(journal: &Journal) -> Self {
        journal.record("app.create");
        Self {
            journal: journal.clone(),
        }
    }
}

impl HostApplication for MockApplication {
    fn initialize(&mut self) {
        self.journal.record("app.initialize");
    }

    fn run(&mut self) {
        self.journal.record("app.run");
    }
}

impl Drop for MockApplication {
    fn drop(&mut self) {
        self.journal.record("app.drop");
    }
}
