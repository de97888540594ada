//! # docs-redirect
//!
//! Redirects a docs versioning driver's calls to its build tool.
//!
//! The driver asks two things of the build tool: its version, and a site
//! build for a given docs version. This crate supplies both as injectable
//! hooks that run a configurable executable instead, and parses the version
//! line back into the shape the driver expects.
//!
//! ## Features
//!
//! - `VersionResolver` and `BuildDispatcher` traits, bundled as `Hooks`
//! - `RedirectingInvoker` implementing both against a configured executable
//! - `driver::run()` installing the hooks and running a `Driver` with them
//! - `ProtocolDriver` answering the original tool's command line
//!
//! ## Example
//!
//! ```rust,no_run
//! use docs_redirect::{BuildRequest, BuildDispatcher, RedirectOptions, RedirectingInvoker, VersionResolver};
//!
//! fn main() -> Result<(), docs_redirect::RedirectError> {
//!     let invoker = RedirectingInvoker::new(&RedirectOptions::default());
//!
//!     // `update_docs --version`
//!     let version = invoker.resolve_version()?;
//!     println!("build tool version {version}");
//!
//!     // `update_docs --quiet build --clean --config-file mkdocs.yml`
//!     invoker.build(BuildRequest::new("2.0").config_file("mkdocs.yml").quiet(true))?;
//!     Ok(())
//! }
//! ```

pub mod driver;
mod error;
mod hook;
mod invoker;
mod options;
mod protocol;

pub use driver::Driver;
pub use error::RedirectError;
pub use hook::{
    BuildDispatcher, BuildOutput, BuildRequest, Hook, Hooks, VersionResolver, VersionToken,
};
pub use invoker::{BuildCommand, RedirectingInvoker};
pub use options::{
    RedirectOptions, DEFAULT_EXECUTABLE, DEFAULT_TOOL_NAME, DEFAULT_VERSION_VAR, EXECUTABLE_ENV,
    SEARCH_DIR_ENV, TOOL_NAME_ENV, VERSION_VAR_ENV,
};
pub use protocol::ProtocolDriver;
