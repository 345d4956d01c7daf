//! Locating executables on `PATH`

use std::env;
use std::path::{Path, PathBuf};

/// Search `PATH` for an executable called `name`.
///
/// Returns the first match, or `None` when `PATH` is unset or no entry
/// holds an executable file of that name.
pub fn discover_binary(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    discover_in(name, env::split_paths(&path))
}

pub(crate) fn discover_in<I>(name: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
