//! Redirect configuration.
//!
//! This module provides the [`RedirectOptions`] struct naming the executable
//! every hook is redirected to, where to find it, and how the target version
//! is handed to it.

use std::env;
use std::path::PathBuf;

/// Executable the hooks run unless configured otherwise.
pub const DEFAULT_EXECUTABLE: &str = "update_docs";

/// Variable the build tool reads the active docs version from.
pub const DEFAULT_VERSION_VAR: &str = "MIKE_DOCS_VERSION";

/// Name the driver originally expected the build tool to report.
pub const DEFAULT_TOOL_NAME: &str = "mkdocs";

/// Override for [`RedirectOptions::executable`].
pub const EXECUTABLE_ENV: &str = "DOCS_REDIRECT_EXECUTABLE";

/// Override for [`RedirectOptions::search_dir`]. Empty disables the prepend.
pub const SEARCH_DIR_ENV: &str = "DOCS_REDIRECT_SEARCH_DIR";

/// Override for [`RedirectOptions::version_var`].
pub const VERSION_VAR_ENV: &str = "DOCS_REDIRECT_VERSION_VAR";

/// Override for [`RedirectOptions::tool_name`].
pub const TOOL_NAME_ENV: &str = "DOCS_REDIRECT_TOOL_NAME";

/// Configuration for the redirecting hooks.
///
/// Fixed for the lifetime of the process. Covers both the wrapper-script
/// setup (custom executable found next to the caller) and the plain setup
/// (original executable name, prefix-tolerant version parsing) with the same
/// fields.
///
/// # Default Behavior
///
/// Runs `update_docs`, searching the current directory before the inherited
/// `PATH`, and exports the target version as `MIKE_DOCS_VERSION`.
///
/// # Example
///
/// ```rust
/// use docs_redirect::RedirectOptions;
///
/// // Keep the original tool name, no PATH prepend
/// let opts = RedirectOptions {
///     executable: "mkdocs".to_string(),
///     search_dir: None,
///     ..Default::default()
/// };
/// assert_eq!(opts.version_var, "MIKE_DOCS_VERSION");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectOptions {
    /// Program to run in place of the driver's original build tool.
    ///
    /// A bare name is looked up on the child's `PATH`; a path is used as is.
    ///
    /// Default: `update_docs`
    pub executable: String,

    /// Directory prepended to the child's `PATH`.
    ///
    /// Default: the current working directory
    pub search_dir: Option<PathBuf>,

    /// Environment variable carrying the target version to the build.
    ///
    /// Default: `MIKE_DOCS_VERSION`
    pub version_var: String,

    /// Name the version line is reported under when speaking the original
    /// tool's protocol.
    ///
    /// Default: `mkdocs`
    pub tool_name: String,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            search_dir: env::current_dir().ok(),
            version_var: DEFAULT_VERSION_VAR.to_string(),
            tool_name: DEFAULT_TOOL_NAME.to_string(),
        }
    }
}

impl RedirectOptions {
    /// Defaults with `DOCS_REDIRECT_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(executable) = non_empty_var(EXECUTABLE_ENV) {
            opts.executable = executable;
        }
        if let Some(dir) = env::var_os(SEARCH_DIR_ENV) {
            opts.search_dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }
        if let Some(var) = non_empty_var(VERSION_VAR_ENV) {
            opts.version_var = var;
        }
        if let Some(name) = non_empty_var(TOOL_NAME_ENV) {
            opts.tool_name = name;
        }
        opts
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
