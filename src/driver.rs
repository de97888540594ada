//! Override installation and driver entry.
//!
//! A [`Driver`] receives its hooks at construction of the call instead of
//! having them patched in: [`run`] builds the redirecting implementations
//! once and passes the same [`Hooks`] to the driver's entry point, so every
//! code path inside the driver sees the replacement.

use crate::{Hooks, RedirectError, RedirectOptions, RedirectingInvoker};
use std::ffi::OsString;
use tracing::info;

/// Entry point of a docs versioning driver.
pub trait Driver {
    /// Run the driver with its full command line (program name first).
    ///
    /// Returns the process exit code on a normal finish. Hook failures are
    /// returned as errors and end the run.
    fn main(&self, args: Vec<OsString>, hooks: Hooks<'_>) -> Result<u8, RedirectError>;
}

/// Build the redirecting hook implementations for this process.
///
/// # Example
///
/// ```rust
/// use docs_redirect::{driver, RedirectOptions};
///
/// let invoker = driver::install_overrides(&RedirectOptions::default());
/// assert_eq!(invoker.executable(), "update_docs");
/// ```
pub fn install_overrides(options: &RedirectOptions) -> RedirectingInvoker {
    let invoker = RedirectingInvoker::new(options);
    info!(
        executable = invoker.executable(),
        search_dir = ?options.search_dir,
        version_var = %options.version_var,
        "Installed build tool overrides"
    );
    invoker
}

/// Install the overrides and run `driver` with them.
///
/// The driver's exit code is returned unchanged; errors propagate to the
/// caller without retry.
///
/// # Example
///
/// ```rust,no_run
/// use docs_redirect::{driver, ProtocolDriver, RedirectOptions};
/// use std::process::ExitCode;
///
/// fn main() -> ExitCode {
///     let options = RedirectOptions::from_env();
///     let protocol = ProtocolDriver::from_env(&options);
///     match driver::run(&protocol, &options, std::env::args_os()) {
///         Ok(code) => ExitCode::from(code),
///         Err(e) => {
///             eprintln!("{e}");
///             ExitCode::from(e.exit_code())
///         }
///     }
/// }
/// ```
pub fn run<D, I>(driver: &D, options: &RedirectOptions, args: I) -> Result<u8, RedirectError>
where
    D: Driver + ?Sized,
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let invoker = install_overrides(options);
    let args = args.into_iter().map(Into::into).collect();
    driver.main(args, Hooks::from_toolchain(&invoker))
}
