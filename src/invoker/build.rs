//! Build command assembly and execution.

use super::path_finder;
use crate::{BuildOutput, Hook, RedirectError};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::Stdio;
use tracing::debug;

/// A fully assembled build invocation.
///
/// `argv[0]` is the configured executable name. `envs` holds only the
/// variables set on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Executable name followed by its arguments.
    pub argv: Vec<OsString>,
    /// Variables added to or replaced in the child's environment.
    pub envs: BTreeMap<OsString, OsString>,
}

impl BuildCommand {
    /// Assemble `<executable> [--quiet] build --clean [--config-file <path>]`.
    pub(crate) fn new(
        executable: &str,
        config_file: Option<&Path>,
        quiet: bool,
        version_var: &str,
        version: &str,
        search_path: &OsStr,
    ) -> Self {
        let mut argv: Vec<OsString> = vec![executable.into()];
        if quiet {
            argv.push("--quiet".into());
        }
        argv.push("build".into());
        argv.push("--clean".into());
        if let Some(config_file) = config_file {
            argv.push("--config-file".into());
            argv.push(config_file.into());
        }

        let envs = BTreeMap::from([
            (OsString::from("PATH"), search_path.to_os_string()),
            (OsString::from(version_var), OsString::from(version)),
        ]);

        Self { argv, envs }
    }

    /// Arguments after the executable name.
    pub fn args(&self) -> &[OsString] {
        self.argv.get(1..).unwrap_or_default()
    }

    /// Value this command sets for `key`, if any.
    pub fn env(&self, key: &str) -> Option<&OsStr> {
        self.envs.get(OsStr::new(key)).map(OsString::as_os_str)
    }
}

fn stdio_pair(output: BuildOutput) -> io::Result<(Stdio, Stdio)> {
    Ok(match output {
        BuildOutput::Inherit => (Stdio::inherit(), Stdio::inherit()),
        BuildOutput::Null => (Stdio::null(), Stdio::null()),
        BuildOutput::File(file) => {
            let stderr = file.try_clone()?;
            (Stdio::from(file), Stdio::from(stderr))
        }
    })
}

/// Run `command` with `program` as the resolved executable, waiting for it
/// to finish.
///
/// # Returns
///
/// `Ok(())` on exit status 0, otherwise:
/// - `ExecutableNotFound` if there is no such program
/// - `Launch` if the output could not be wired up or the process not started
/// - `NonZeroExit` for any unsuccessful exit
pub(crate) fn run_build(
    program: &Path,
    command: &BuildCommand,
    output: BuildOutput,
) -> Result<(), RedirectError> {
    let executable = command
        .argv
        .first()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let (stdout, stderr) =
        stdio_pair(output).map_err(|e| RedirectError::launch(&executable, &e))?;

    debug!(
        hook = %Hook::Build,
        program = %program.display(),
        args = ?command.args(),
        "Dispatching site build"
    );

    let status = path_finder::command(program, &executable)
        .args(command.args())
        .envs(&command.envs)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .status()
        .map_err(|e| RedirectError::spawn(&executable, &e))?;

    if !status.success() {
        return Err(RedirectError::NonZeroExit {
            hook: Hook::Build,
            program: executable.into_owned(),
            code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn argv(command: &BuildCommand) -> Vec<&str> {
        command.argv.iter().map(|a| a.to_str().unwrap()).collect()
    }

    #[test]
    fn test_full_command() {
        let command = BuildCommand::new(
            "update_docs",
            Some(Path::new("cfg.yml")),
            true,
            "MIKE_DOCS_VERSION",
            "2.0.0",
            OsStr::new("/bin"),
        );
        assert_eq!(
            argv(&command),
            [
                "update_docs",
                "--quiet",
                "build",
                "--clean",
                "--config-file",
                "cfg.yml"
            ]
        );
        assert_eq!(
            command.env("MIKE_DOCS_VERSION"),
            Some(OsStr::new("2.0.0"))
        );
        assert_eq!(command.env("PATH"), Some(OsStr::new("/bin")));
    }

    #[test]
    fn test_no_config_file_omits_flag() {
        let command = BuildCommand::new(
            "update_docs",
            None,
            false,
            "MIKE_DOCS_VERSION",
            "1.0",
            OsStr::new(""),
        );
        assert_eq!(argv(&command), ["update_docs", "build", "--clean"]);
        assert!(!command.argv.iter().any(|a| a == "--config-file"));
    }

    #[test]
    fn test_args_skip_executable() {
        let command = BuildCommand::new("mkdocs", None, true, "V", "1.0", OsStr::new(""));
        assert_eq!(command.args(), ["--quiet", "build", "--clean"]);
    }

    #[test]
    fn test_custom_version_var() {
        let command = BuildCommand::new("mkdocs", None, false, "DOCS_VERSION", "3.1", OsStr::new(""));
        assert_eq!(command.env("DOCS_VERSION"), Some(OsStr::new("3.1")));
        assert_eq!(command.env("MIKE_DOCS_VERSION"), None);
    }

    #[test]
    fn test_run_build_nonexistent() {
        let command = BuildCommand::new("update_docs", None, false, "V", "1.0", OsStr::new(""));
        let program = PathBuf::from("/nonexistent/path/to/update_docs");
        let result = run_build(&program, &command, BuildOutput::Null);
        assert!(matches!(
            result,
            Err(RedirectError::ExecutableNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_build_non_zero_exit() {
        let Ok(program) = which::which("false") else {
            return;
        };
        let command = BuildCommand::new("false", None, false, "V", "1.0", OsStr::new(""));
        let result = run_build(&program, &command, BuildOutput::Null);
        assert!(matches!(
            result,
            Err(RedirectError::NonZeroExit {
                hook: Hook::Build,
                code: Some(1),
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_build_success() {
        let Ok(program) = which::which("true") else {
            return;
        };
        let command = BuildCommand::new("true", None, false, "V", "1.0", OsStr::new(""));
        assert!(run_build(&program, &command, BuildOutput::Null).is_ok());
    }
}
