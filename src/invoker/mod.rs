//! Redirecting hook implementations.
//!
//! [`RedirectingInvoker`] answers both hooks by running the configured
//! executable instead of the driver's original build tool:
//!
//! - `program_for`: lookup on the child's `PATH`, falling back to the name
//! - `check_version`: blocking `<executable> --version`
//! - `parse_version`: regex extraction of the version token
//! - `run_build`: blocking `<executable> [--quiet] build --clean ...`

mod build;
mod parser;
mod path_finder;
mod version;

pub use build::BuildCommand;

use crate::{
    BuildDispatcher, BuildRequest, RedirectError, RedirectOptions, VersionResolver, VersionToken,
};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Runs the configured executable in place of the driver's build tool.
///
/// Immutable once built; every call spawns exactly one child and waits for
/// it. The parent process environment is never modified.
///
/// # Example
///
/// ```rust
/// use docs_redirect::{BuildRequest, RedirectOptions, RedirectingInvoker};
///
/// let invoker = RedirectingInvoker::new(&RedirectOptions::default());
/// let command = invoker.build_command(&BuildRequest::new("2.0.0").config_file("cfg.yml"));
/// assert_eq!(command.args(), ["build", "--clean", "--config-file", "cfg.yml"]);
/// assert_eq!(
///     command.env("MIKE_DOCS_VERSION").and_then(|v| v.to_str()),
///     Some("2.0.0")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RedirectingInvoker {
    executable: String,
    version_var: String,
    search_path: OsString,
}

impl RedirectingInvoker {
    /// Build an invoker from `options`, capturing the child `PATH` once.
    pub fn new(options: &RedirectOptions) -> Self {
        Self {
            executable: options.executable.clone(),
            version_var: options.version_var.clone(),
            search_path: path_finder::search_path(options.search_dir.as_deref()),
        }
    }

    /// The configured executable name.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The `PATH` every child is started with.
    pub fn search_path(&self) -> &OsStr {
        &self.search_path
    }

    /// Assemble the command a build request would run, without running it.
    pub fn build_command(&self, request: &BuildRequest) -> BuildCommand {
        BuildCommand::new(
            &self.executable,
            request.config_file.as_deref(),
            request.quiet,
            &self.version_var,
            &request.version,
            &self.search_path,
        )
    }

    fn program(&self) -> PathBuf {
        path_finder::program_for(&self.executable, &self.search_path)
    }
}

impl VersionResolver for RedirectingInvoker {
    fn resolve_version(&self) -> Result<VersionToken, RedirectError> {
        let program = self.program();
        let output = version::check_version(&program, &self.executable, &self.search_path)?;
        parser::parse_version(&output)
    }
}

impl BuildDispatcher for RedirectingInvoker {
    fn build(&self, request: BuildRequest) -> Result<(), RedirectError> {
        let program = self.program();
        let command = self.build_command(&request);
        build::run_build(&program, &command, request.output)
    }
}
