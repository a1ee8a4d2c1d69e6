//! Process role dispatch
//!
//! Every process CEF spawns re-enters the same bootstrap. After platform setup
//! the engine gets the first look at the arguments: if they describe a
//! subprocess it runs that role to completion and hands back its exit code,
//! otherwise it returns a negative sentinel and we carry on as the browser
//! process.

use crate::args::{ProcessArguments, ProcessRole};
use crate::engine::Engine;

/// Outcome of role dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A subprocess ran and finished; its code is the process exit status
    SubProcessExited(i32),
    /// This is the browser process
    MainProcess,
}

/// Let the engine classify (and, for subprocesses, run) this process
pub fn dispatch<E: Engine + ?Sized>(engine: &mut E, args: &ProcessArguments) -> Dispatch {
    let role = args.role();
    tracing::debug!("Dispatching process role (arguments suggest {})", role);

    let code = engine.execute_sub_process(args);
    if code >= 0 {
        tracing::info!("CEF {} subprocess exited with code: {}", role, code);
        return Dispatch::SubProcessExited(code);
    }

    if role != ProcessRole::Main {
        // The engine has the final say; a stray --type flag is not a subprocess
        tracing::warn!(
            "Arguments carry a {} process type but CEF treated this as the browser process",
            role
        );
    }
    Dispatch::MainProcess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Journal, MockEngine};

    #[test]
    fn test_subprocess_code_is_returned() {
        let journal = Journal::default();
        let mut engine = MockEngine::new(&journal);
        let args = ProcessArguments::new(["lumen", "--type=renderer"]);

        assert_eq!(dispatch(&mut engine, &args), Dispatch::SubProcessExited(0));
        assert_eq!(journal.entries(), vec!["engine.execute_sub_process"]);
    }

    #[test]
    fn test_nonzero_subprocess_code_passes_through() {
        let journal = Journal::default();
        let mut engine = MockEngine::new(&journal).with_sub_process_code(Some(9));
        let args = ProcessArguments::new(["lumen", "--type=gpu-process"]);

        assert_eq!(dispatch(&mut engine, &args), Dispatch::SubProcessExited(9));
    }

    #[test]
    fn test_main_process_falls_through() {
        let journal = Journal::default();
        let mut engine = MockEngine::new(&journal);
        let args = ProcessArguments::new(["lumen"]);

        assert_eq!(dispatch(&mut engine, &args), Dispatch::MainProcess);
    }

    #[test]
    fn test_engine_decides_over_arguments() {
        let journal = Journal::default();
        let mut engine = MockEngine::new(&journal).with_sub_process_code(None);
        let args = ProcessArguments::new(["lumen", "--type=renderer"]);

        assert_eq!(dispatch(&mut engine, &args), Dispatch::MainProcess);
    }
}
