use anyhow::Context;
use docs_redirect::{driver, ProtocolDriver, RedirectError, RedirectOptions};
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, prelude::*};

/// Log filter directives, e.g. `debug` or `docs_redirect=trace`.
const LOG_ENV: &str = "DOCS_REDIRECT_LOG";

fn main() -> ExitCode {
    if let Err(err) = initialize_tracing() {
        eprintln!("Warning: {err:#}");
    }

    match try_main() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<RedirectError>()
                .map_or(1, RedirectError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn try_main() -> anyhow::Result<u8> {
    let options = RedirectOptions::from_env();
    let protocol = ProtocolDriver::from_env(&options);
    driver::run(&protocol, &options, std::env::args_os()).with_context(|| {
        format!(
            "Error redirecting `{}` to `{}`",
            options.tool_name, options.executable
        )
    })
}

/// Set up tracing to log to stderr, leaving stdout to the tool protocol
fn initialize_tracing() -> anyhow::Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid {LOG_ENV} value `{directives}`"))?,
        Err(_) => EnvFilter::new("warn"),
    };
    let stderr_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);
    tracing_subscriber::registry()
        .with(stderr_subscriber)
        .try_init()
        .context("Error initializing tracing")?;
    Ok(())
}
