//! Process arguments and the role they describe
//!
//! CEF owns the argument grammar. The only flag we look at is `--type=`, and
//! only to describe the process in logs: whether this instance really is a
//! subprocess is decided by the engine (see [`crate::dispatch`]).

use std::fmt;
use std::sync::Arc;

/// Flag CEF appends when it re-executes the binary as a subprocess
const PROCESS_TYPE_FLAG: &str = "--type=";

/// Raw command-line tokens, captured once at process start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessArguments {
    tokens: Arc<[String]>,
}

impl ProcessArguments {
    /// Capture the current process's arguments (including argv[0])
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().map(|a| a.to_string_lossy().into_owned()))
    }

    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::<String>::into).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Value of CEF's `--type=` flag, if present
    pub fn process_type(&self) -> Option<&str> {
        self.tokens
            .iter()
            .find_map(|t| t.strip_prefix(PROCESS_TYPE_FLAG))
    }

    /// Descriptive role for diagnostics
    pub fn role(&self) -> ProcessRole {
        match self.process_type() {
            Some(kind) => ProcessRole::SubProcess(SubProcessKind::from_flag(kind)),
            None => ProcessRole::Main,
        }
    }
}

/// Subprocess flavours CEF spawns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubProcessKind {
    Renderer,
    Gpu,
    Utility,
    Zygote,
    Other(String),
}

impl SubProcessKind {
    fn from_flag(value: &str) -> Self {
        match value {
            "renderer" => Self::Renderer,
            "gpu-process" => Self::Gpu,
            "utility" => Self::Utility,
            "zygote" => Self::Zygote,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What this process instance is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessRole {
    /// Browser process owning the application lifecycle
    Main,
    /// Engine-spawned helper
    SubProcess(SubProcessKind),
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("browser"),
            Self::SubProcess(SubProcessKind::Renderer) => f.write_str("renderer"),
            Self::SubProcess(SubProcessKind::Gpu) => f.write_str("gpu"),
            Self::SubProcess(SubProcessKind::Utility) => f.write_str("utility"),
            Self::SubProcess(SubProcessKind::Zygote) => f.write_str("zygote"),
            Self::SubProcess(SubProcessKind::Other(kind)) => write!(f, "{}", kind),
        }
    }
}
