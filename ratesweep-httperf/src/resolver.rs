//! Checking the configured httperf binary before any run starts

use crate::error::{HttperfError, HttperfResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Confirm that `configured` names an existing, executable file.
pub fn resolve_binary(configured: Option<&Path>) -> HttperfResult<PathBuf> {
    let path = configured.ok_or(HttperfError::BinaryNotConfigured)?;

    let metadata = match path.metadata() {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(HttperfError::BinaryNotFound(path.to_path_buf())),
    };

    if !is_executable(&metadata) {
        return Err(HttperfError::BinaryNotExecutable(path.to_path_buf()));
    }

    debug!("Using httperf binary at {:?}", path);
    Ok(path.to_path_buf())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
