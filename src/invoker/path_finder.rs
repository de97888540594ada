//! Search path assembly and executable lookup.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Build the child's `PATH`: `search_dir` first, then the inherited entries.
///
/// If `search_dir` cannot be joined into a path list (it contains the
/// platform's separator) the inherited `PATH` is used unchanged.
pub(crate) fn search_path(search_dir: Option<&Path>) -> OsString {
    let inherited = env::var_os("PATH").unwrap_or_default();
    let Some(dir) = search_dir else {
        return inherited;
    };

    let entries = std::iter::once(dir.to_path_buf()).chain(env::split_paths(&inherited));
    match env::join_paths(entries) {
        Ok(joined) => joined,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Not prepending search directory to PATH");
            inherited
        }
    }
}

/// Find an executable by name on the given search path.
///
/// Names containing a path separator are resolved against the current
/// directory instead, the same way a shell would.
///
/// # Returns
///
/// `Some(PathBuf)` if the executable is found, `None` otherwise.
pub(crate) fn find_executable(name: &str, search_path: &OsString) -> Option<PathBuf> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(name, Some(search_path), cwd).ok()
}

/// Program to spawn for `name`: the resolved path, or the bare name when
/// lookup fails so the OS reports why it can't be run (missing or not
/// executable).
pub(crate) fn program_for(name: &str, search_path: &OsString) -> PathBuf {
    find_executable(name, search_path).unwrap_or_else(|| {
        debug!(executable = name, "Lookup failed, spawning by name");
        PathBuf::from(name)
    })
}

/// A command running `program` whose child sees `executable` as argv[0].
pub(crate) fn command(program: &Path, executable: &str) -> Command {
    let mut command = Command::new(program);
    set_arg0(&mut command, executable);
    command
}

#[cfg(unix)]
fn set_arg0(command: &mut Command, executable: &str) {
    use std::os::unix::process::CommandExt;
    command.arg0(executable);
}

#[cfg(not(unix))]
fn set_arg0(_command: &mut Command, _executable: &str) {}
