//! The embedding engine as seen by the bootstrap
//!
//! CEF's process-wide calls are modelled as one collaborator object that is
//! constructed once per process and handed to the bootstrap by value. The
//! init/shutdown ordering is enforced by [`crate::lifecycle::HostLifecycle`].

use crate::args::ProcessArguments;
use crate::settings::BrowserSettings;

/// Return value of [`Engine::execute_sub_process`] for the browser process.
///
/// CEF's contract: a non-negative value is a finished subprocess's exit
/// code, a negative value means "not a subprocess".
pub const NOT_A_SUBPROCESS: i32 = -1;

/// Multi-process embedding engine
pub trait Engine {
    /// Run the subprocess role described by `args`, if any.
    ///
    /// Returns the subprocess exit code (>= 0) or a negative sentinel when
    /// this is the browser process.
    fn execute_sub_process(&mut self, args: &ProcessArguments) -> i32;

    /// Initialize the browser process. Called at most once.
    fn initialize(&mut self, args: &ProcessArguments, settings: &BrowserSettings) -> bool;

    /// Tear down the browser process. Called exactly once after a successful
    /// [`initialize`](Self::initialize).
    fn shutdown(&mut self);

    /// Exit code the engine reports after a failed initialization
    fn exit_code(&self) -> i32;
}
