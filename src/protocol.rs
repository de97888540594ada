//! A driver that speaks the original build tool's command line.
//!
//! Installed under the original tool's name, [`ProtocolDriver`] lets an
//! unmodified docs versioning driver keep shelling out to `mkdocs` while
//! every call is answered by the redirecting hooks. Only the two commands
//! such a driver issues are understood:
//!
//! - `--version` prints `<tool_name>, version <token>`
//! - `[--quiet] build [--clean] [--config-file <path>]` builds the version
//!   named by the version variable

use crate::driver::Driver;
use crate::{BuildOutput, BuildRequest, Hooks, RedirectError, RedirectOptions};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(disable_version_flag = true, disable_help_subcommand = true)]
struct ToolArgs {
    /// Show the build tool's version and exit
    #[arg(long)]
    version: bool,

    /// Silence warnings
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<ToolCommand>,
}

#[derive(Debug, Subcommand)]
enum ToolCommand {
    /// Build the documentation
    Build {
        /// Remove old files from the site directory before building
        #[arg(short, long)]
        clean: bool,

        /// Provide a specific config file
        #[arg(short = 'f', long)]
        config_file: Option<PathBuf>,
    },
}

/// Answers the original build tool's command line through injected hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDriver {
    tool_name: String,
    version_var: String,
    target_version: Option<String>,
}

impl ProtocolDriver {
    /// A driver reporting as `options.tool_name`, with no target version.
    pub fn new(options: &RedirectOptions) -> Self {
        Self {
            tool_name: options.tool_name.clone(),
            version_var: options.version_var.clone(),
            target_version: None,
        }
    }

    /// Like [`ProtocolDriver::new`], taking the target version from the
    /// version variable in the process environment.
    pub fn from_env(options: &RedirectOptions) -> Self {
        let target_version = env::var(&options.version_var).ok();
        Self {
            target_version,
            ..Self::new(options)
        }
    }

    /// Set the version `build` will produce.
    pub fn with_target_version(mut self, version: impl Into<String>) -> Self {
        self.target_version = Some(version.into());
        self
    }

    /// Run against `hooks`, writing protocol output to `out`.
    pub fn run_with<W: Write>(
        &self,
        args: Vec<OsString>,
        hooks: Hooks<'_>,
        out: &mut W,
    ) -> Result<u8, RedirectError> {
        let args = match ToolArgs::try_parse_from(args) {
            Ok(args) => args,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                write!(out, "{}", err.render())?;
                return Ok(0);
            }
            Err(err) => {
                return Err(RedirectError::InvalidArguments {
                    message: err.render().to_string().trim_end().to_string(),
                })
            }
        };
        debug!(?args, "Parsed build tool arguments");

        if args.version {
            let token = hooks.resolve_version()?;
            writeln!(out, "{}, version {}", self.tool_name, token)?;
            return Ok(0);
        }

        match args.command {
            Some(ToolCommand::Build { config_file, clean }) => {
                if !clean {
                    debug!("Build requested without --clean, building clean anyway");
                }
                let version = self.target_version.clone().ok_or_else(|| {
                    RedirectError::MissingTargetVersion {
                        var: self.version_var.clone(),
                    }
                })?;
                hooks.build(BuildRequest {
                    config_file,
                    version,
                    quiet: args.quiet,
                    output: BuildOutput::Inherit,
                })?;
                Ok(0)
            }
            None => Err(RedirectError::InvalidArguments {
                message: format!("{}: expected `--version` or `build`", self.tool_name),
            }),
        }
    }
}

impl Driver for ProtocolDriver {
    fn main(&self, args: Vec<OsString>, hooks: Hooks<'_>) -> Result<u8, RedirectError> {
        self.run_with(args, hooks, &mut io::stdout().lock())
    }
}
