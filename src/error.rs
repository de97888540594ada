//! Error types for redirected hook calls.

use crate::Hook;
use std::io;
use thiserror::Error;

/// Errors raised while redirecting a hook to the configured executable.
///
/// None of these are recovered from locally. They bubble up to the process
/// boundary, where [`RedirectError::exit_code`] picks the exit status.
///
/// # Example
///
/// ```rust
/// use docs_redirect::RedirectError;
///
/// let error = RedirectError::UnparsableVersion {
///     output: "no version here".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "version output did not match expected format: no version here"
/// );
/// assert_eq!(error.exit_code(), 1);
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RedirectError {
    /// The executable is not on the search path.
    #[error("executable `{executable}` not found on the search path")]
    ExecutableNotFound {
        /// The configured executable name.
        executable: String,
    },

    /// The child process could not be started.
    #[error("failed to launch `{program}`: {message}")]
    Launch {
        /// Program that failed to start.
        program: String,
        /// Kind of the underlying I/O error.
        kind: io::ErrorKind,
        /// Message of the underlying I/O error.
        message: String,
    },

    /// The child process ran but exited unsuccessfully.
    #[error("`{program}` exited with {} during {hook}", describe_code(.code))]
    NonZeroExit {
        /// Hook that was being served.
        hook: Hook,
        /// Program that failed.
        program: String,
        /// Exit code, `None` if the child was killed by a signal.
        code: Option<i32>,
    },

    /// The `--version` output did not have the `<name>, version <token>` shape.
    #[error("version output did not match expected format: {output}")]
    UnparsableVersion {
        /// The offending output, trimmed.
        output: String,
    },

    /// A build was requested but the version variable is not set.
    #[error("target version variable `{var}` is not set")]
    MissingTargetVersion {
        /// Name of the variable that was expected.
        var: String,
    },

    /// Arguments did not follow the build tool's command-line protocol.
    #[error("{message}")]
    InvalidArguments {
        /// Rendered usage error.
        message: String,
    },

    /// Writing the driver's own output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl RedirectError {
    pub(crate) fn launch(program: &str, err: &io::Error) -> Self {
        Self::Launch {
            program: program.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Map a failed spawn: a missing program is `ExecutableNotFound`, any
    /// other OS error (permission denied included) is `Launch`.
    pub(crate) fn spawn(executable: &str, err: &io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::ExecutableNotFound {
                executable: executable.to_string(),
            }
        } else {
            Self::launch(executable, err)
        }
    }

    /// Process exit status this error should produce.
    ///
    /// A child's own status passes through when it fits in an exit code,
    /// usage errors map to 2, everything else to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NonZeroExit {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            Self::InvalidArguments { .. } => 2,
            _ => 1,
        }
    }

    /// Whether the executable was found but could not be run.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Launch {
                kind: io::ErrorKind::PermissionDenied,
                ..
            }
        )
    }
}
