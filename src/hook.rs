//! Hook points a docs versioning driver calls out through.
//!
//! The driver never spawns the build tool itself. It asks a
//! [`VersionResolver`] for the tool version and a [`BuildDispatcher`] to
//! build the site, and receives both bundled as [`Hooks`].

use crate::RedirectError;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

/// The swappable call-out points inside the driver.
///
/// # Example
///
/// ```rust
/// use docs_redirect::Hook;
///
/// assert_eq!(Hook::Version.to_string(), "version");
/// assert_eq!(Hook::Build.to_string(), "build");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Hook {
    /// Look up the build tool's version.
    Version,
    /// Build the site for one target version.
    Build,
}

/// Opaque version string reported by the build tool.
///
/// Always a single non-whitespace token that followed `, version ` in the
/// tool's output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken(String);

impl VersionToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a build sends the child's stdout and stderr.
#[derive(Debug, Default)]
pub enum BuildOutput {
    /// Share the parent's streams.
    #[default]
    Inherit,
    /// Discard everything.
    Null,
    /// Write both streams to this file.
    File(File),
}

/// One request to build the site.
///
/// Consumed by [`BuildDispatcher::build`]; nothing is retained afterwards.
#[derive(Debug)]
pub struct BuildRequest {
    /// Config file to pass through, if any. `None` omits the flag entirely.
    pub config_file: Option<PathBuf>,
    /// Target version, exported to the child through the version variable.
    pub version: String,
    /// Ask the build tool to be quiet.
    pub quiet: bool,
    /// Destination for the child's output.
    pub output: BuildOutput,
}

impl BuildRequest {
    /// A request for `version` with no config file, not quiet, inherited output.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            config_file: None,
            version: version.into(),
            quiet: false,
            output: BuildOutput::Inherit,
        }
    }

    /// Set the config file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the quiet flag.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set the output destination.
    pub fn output(mut self, output: BuildOutput) -> Self {
        self.output = output;
        self
    }
}

/// Resolves the build tool's current version.
pub trait VersionResolver {
    /// Ask the tool for its version token.
    fn resolve_version(&self) -> Result<VersionToken, RedirectError>;
}

/// Runs the build tool to produce the site for one version.
pub trait BuildDispatcher {
    /// Run one build to completion. Any failure aborts the enclosing action.
    fn build(&self, request: BuildRequest) -> Result<(), RedirectError>;
}

/// Hook implementations handed to a driver's entry point.
///
/// Every code path in the driver that needs the tool version or a build
/// goes through the same `Hooks` value, so the substitution covers the
/// whole run.
#[derive(Clone, Copy)]
pub struct Hooks<'a> {
    /// Replacement for the driver's version lookup.
    pub version: &'a dyn VersionResolver,
    /// Replacement for the driver's build invocation.
    pub build: &'a dyn BuildDispatcher,
}

impl<'a> Hooks<'a> {
    /// Bundle a resolver and a dispatcher.
    pub fn new(version: &'a dyn VersionResolver, build: &'a dyn BuildDispatcher) -> Self {
        Self { version, build }
    }

    /// Use one value for both hooks.
    pub fn from_toolchain<T>(toolchain: &'a T) -> Self
    where
        T: VersionResolver + BuildDispatcher,
    {
        Self {
            version: toolchain,
            build: toolchain,
        }
    }

    /// Resolve the tool version through the installed hook.
    pub fn resolve_version(&self) -> Result<VersionToken, RedirectError> {
        self.version.resolve_version()
    }

    /// Build through the installed hook.
    pub fn build(&self, request: BuildRequest) -> Result<(), RedirectError> {
        self.build.build(request)
    }
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
