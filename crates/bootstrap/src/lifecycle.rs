//! Browser-process lifecycle
//!
//! ```text
//! Uninitialized -> EngineInitialized -> ApplicationRunning -> EngineShutdown -> Terminated
//!       |                                                                         ^
//!       +----------------------- engine init failed ------------------------------+
//! ```
//!
//! The host application only exists between `EngineInitialized` and
//! `EngineShutdown`, and is dropped before the engine is shut down.

use crate::args::ProcessArguments;
use crate::engine::Engine;
use crate::error::BootstrapError;
use crate::settings::BrowserSettings;

/// The embedding application that owns the main thread while CEF is up
pub trait HostApplication {
    /// One-time setup, called before [`run`](Self::run)
    fn initialize(&mut self);

    /// Blocks until the application asks to stop
    fn run(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    EngineInitialized,
    ApplicationRunning,
    EngineShutdown,
    Terminated,
}

impl LifecycleState {
    fn can_advance_to(self, next: Self) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Uninitialized, EngineInitialized)
                | (Uninitialized, Terminated)
                | (EngineInitialized, ApplicationRunning)
                | (ApplicationRunning, EngineShutdown)
                | (EngineShutdown, Terminated)
        )
    }
}

/// Drives the engine and host application through the browser-process states
pub struct HostLifecycle<E: Engine> {
    engine: E,
    state: LifecycleState,
}

impl<E: Engine> HostLifecycle<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: LifecycleState::Uninitialized,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn advance(&mut self, next: LifecycleState) -> Result<(), BootstrapError> {
        if !self.state.can_advance_to(next) {
            return Err(BootstrapError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!("Lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Initialize the engine, run the application, shut the engine down.
    ///
    /// `make_app` is only called once initialization has succeeded. On
    /// initialization failure the engine's own exit code is returned inside
    /// [`BootstrapError::EngineInit`].
    pub fn run<A, F>(
        &mut self,
        args: &ProcessArguments,
        settings: &BrowserSettings,
        make_app: F,
    ) -> Result<(), BootstrapError>
    where
        A: HostApplication,
        F: FnOnce() -> A,
    {
        if self.state != LifecycleState::Uninitialized {
            return Err(BootstrapError::InvalidTransition {
                from: self.state,
                to: LifecycleState::EngineInitialized,
            });
        }

        if !self.engine.initialize(args, settings) {
            let code = self.engine.exit_code();
            self.advance(LifecycleState::Terminated)?;
            return Err(BootstrapError::EngineInit { code });
        }
        self.advance(LifecycleState::EngineInitialized)?;
        tracing::info!("CEF initialized successfully");

        {
            let mut app = make_app();
            self.advance(LifecycleState::ApplicationRunning)?;
            app.initialize();
            app.run();
        }
        tracing::info!("Host application stopped");

        self.advance(LifecycleState::EngineShutdown)?;
        self.engine.shutdown();
        tracing::info!("CEF shut down");

        self.advance(LifecycleState::Terminated)
    }
}
