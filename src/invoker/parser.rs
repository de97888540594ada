//! Version line parsing with regex extraction.

use crate::{RedirectError, VersionToken};
use regex::Regex;
use std::sync::OnceLock;

/// `<name>, version <token>`, anchored at the start of the line.
const VERSION_LINE: &str = r"^\S+, version (\S+)";

fn version_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_LINE).expect("version line pattern is valid"))
}

/// Extract the version token from `--version` output.
///
/// Trailing whitespace is trimmed and only the first line is considered.
/// The program name before the comma is not checked, so a wrapper reporting
/// under its own name parses the same as the original tool:
///
/// - `mkdocs, version 1.5.3 from /usr/lib/python3 (Python 3.11)` -> `1.5.3`
/// - `update_docs, version 9.9.9-rc1` -> `9.9.9-rc1`
///
/// # Returns
///
/// `Ok(VersionToken)` on a match, or
/// `Err(RedirectError::UnparsableVersion)` carrying the trimmed output.
pub(crate) fn parse_version(output: &str) -> Result<VersionToken, RedirectError> {
    let trimmed = output.trim_end();
    let first_line = trimmed.lines().next().unwrap_or_default();

    version_line()
        .captures(first_line)
        .and_then(|caps| caps.get(1))
        .map(|token| VersionToken::new(token.as_str()))
        .ok_or_else(|| RedirectError::UnparsableVersion {
            output: trimmed.to_string(),
        })
}
