//! Subprocess helper discovery
//!
//! CEF re-executes the main binary for its subprocesses unless told
//! otherwise. Pointing it at a small dedicated helper keeps the host's own
//! start-up work out of renderer/GPU processes. Without a helper the main
//! binary still works, because it routes through the same bootstrap.

use std::path::{Path, PathBuf};

/// File name of the helper binary
pub const HELPER_BINARY_NAME: &str = "lumen-cef-helper";

/// Find the helper: an explicit path if it exists, else next to the current executable
pub fn find_helper_binary(explicit: Option<&Path>) -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    find_helper_binary_in(explicit, exe_dir.as_deref())
}

pub fn find_helper_binary_in(explicit: Option<&Path>, exe_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            tracing::info!("Using CEF helper binary: {}", path.display());
            return Some(path.to_path_buf());
        }
        tracing::warn!("CEF_HELPER_PATH set but file not found: {}", path.display());
    }

    if let Some(dir) = exe_dir {
        let helper = dir.join(format!("{}{}", HELPER_BINARY_NAME, std::env::consts::EXE_SUFFIX));
        if helper.exists() {
            tracing::info!("Using CEF helper binary: {}", helper.display());
            return Some(helper);
        }
        tracing::debug!("Helper not found at: {:?}", helper);
    }

    tracing::info!("No CEF helper binary; subprocesses will re-execute the main binary");
    None
}
