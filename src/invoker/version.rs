//! Blocking `--version` query.

use super::path_finder;
use crate::{Hook, RedirectError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tracing::debug;

/// Run `program --version` and return its standard output.
///
/// Standard error stays attached to the parent. The child's `PATH` is
/// replaced with `search_path` and its argv[0] is `executable`.
///
/// # Returns
///
/// `Ok(String)` with the raw stdout, or a `RedirectError`:
/// - `ExecutableNotFound` if there is no such program
/// - `Launch` if it could not be started (e.g. permission denied)
/// - `NonZeroExit` if it exited unsuccessfully
/// - `UnparsableVersion` if stdout is not valid UTF-8
pub(crate) fn check_version(
    program: &Path,
    executable: &str,
    search_path: &OsStr,
) -> Result<String, RedirectError> {
    debug!(
        hook = %Hook::Version,
        program = %program.display(),
        "Querying build tool version"
    );

    let output = path_finder::command(program, executable)
        .arg("--version")
        .env("PATH", search_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| RedirectError::spawn(executable, &e))?;

    if !output.status.success() {
        return Err(RedirectError::NonZeroExit {
            hook: Hook::Version,
            program: executable.to_string(),
            code: output.status.code(),
        });
    }

    String::from_utf8(output.stdout).map_err(|e| RedirectError::UnparsableVersion {
        output: String::from_utf8_lossy(e.as_bytes()).trim_end().to_string(),
    })
}
