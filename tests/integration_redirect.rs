//! Integration tests for redirected hooks.
//!
//! Each test writes a small shell script standing in for the build tool into
//! a temporary directory and points the hooks at it through the search
//! directory, so nothing outside the temp dir is needed.

#![cfg(unix)]

use docs_redirect::{
    BuildDispatcher, BuildOutput, BuildRequest, Hook, Hooks, ProtocolDriver, RedirectError,
    RedirectOptions, RedirectingInvoker, VersionResolver,
};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const TOOL: &str = "fake_docs";

/// Write an executable `#!/bin/sh` script named [`TOOL`] into `dir`.
fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join(TOOL);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn options(dir: &Path) -> RedirectOptions {
    RedirectOptions {
        executable: TOOL.to_string(),
        search_dir: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

fn invoker_with(body: &str) -> (TempDir, RedirectingInvoker) {
    let dir = tempfile::tempdir().unwrap();
    write_tool(dir.path(), body);
    let invoker = RedirectingInvoker::new(&options(dir.path()));
    (dir, invoker)
}

/// Script body that records its arguments, one per line, and the version
/// variable into `dir`.
fn recording_body(dir: &Path) -> String {
    format!(
        "printf '%s\\n' \"$@\" > '{dir}/args'\nprintf '%s' \"$MIKE_DOCS_VERSION\" > '{dir}/version'",
        dir = dir.display()
    )
}

fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_resolve_version_plain() {
    let (_dir, invoker) = invoker_with("echo 'foo, version 1.2.3'");
    assert_eq!(invoker.resolve_version().unwrap().as_str(), "1.2.3");
}

#[test]
fn test_resolve_version_prerelease_with_newline() {
    let (_dir, invoker) = invoker_with("printf 'bar, version 9.9.9-rc1\\n'");
    assert_eq!(invoker.resolve_version().unwrap().as_str(), "9.9.9-rc1");
}

#[test]
fn test_resolve_version_passes_only_version_flag() {
    let (_dir, invoker) = invoker_with(
        "[ \"$#\" -eq 1 ] && [ \"$1\" = \"--version\" ] || exit 9\necho 'update_docs, version 2.0.0'",
    );
    assert_eq!(invoker.resolve_version().unwrap().as_str(), "2.0.0");
}

#[test]
fn test_resolve_version_unparsable() {
    let (_dir, invoker) = invoker_with("echo 'no version here'");
    match invoker.resolve_version() {
        Err(RedirectError::UnparsableVersion { output }) => assert_eq!(output, "no version here"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_resolve_version_non_zero_exit_is_repeatable() {
    let (_dir, invoker) = invoker_with("echo 'foo, version 1.2.3'\nexit 1");
    for _ in 0..2 {
        assert!(matches!(
            invoker.resolve_version(),
            Err(RedirectError::NonZeroExit {
                hook: Hook::Version,
                code: Some(1),
                ..
            })
        ));
    }
}

#[test]
fn test_child_path_starts_with_search_dir() {
    let (dir, invoker) = invoker_with("echo \"tool, version ${PATH%%:*}\"");
    let token = invoker.resolve_version().unwrap();
    assert_eq!(Path::new(token.as_str()), dir.path());
}

#[test]
fn test_missing_tool_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let invoker = RedirectingInvoker::new(&options(dir.path()));
    match invoker.resolve_version() {
        Err(RedirectError::ExecutableNotFound { executable }) => assert_eq!(executable, TOOL),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_not_executable_is_permission_denied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_tool(dir.path(), "echo 'foo, version 1.2.3'");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let invoker = RedirectingInvoker::new(&options(dir.path()));
    let err = invoker.resolve_version().unwrap_err();
    assert!(matches!(
        err,
        RedirectError::Launch {
            kind: io::ErrorKind::PermissionDenied,
            ..
        }
    ));
    assert!(err.is_permission_denied());

    let err = invoker
        .build(BuildRequest::new("1.0").output(BuildOutput::Null))
        .unwrap_err();
    assert!(err.is_permission_denied());
}

#[test]
fn test_child_sees_executable_name_as_argv0() {
    // Scripts get their path as $0 from the kernel, so link a real binary
    // that names itself after argv[0] in its usage errors.
    let Ok(cat) = which::which("cat") else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    symlink(&cat, dir.path().join(TOOL)).unwrap();
    let invoker = RedirectingInvoker::new(&options(dir.path()));

    let log_path = dir.path().join("build.log");
    let log = fs::File::create(&log_path).unwrap();
    // `cat` rejects `--clean`
    let _ = invoker.build(BuildRequest::new("1.0").output(BuildOutput::File(log)));

    let logged = fs::read_to_string(&log_path).unwrap();
    assert!(logged.starts_with(&format!("{TOOL}:")), "{logged}");
    assert!(!logged.contains(&dir.path().display().to_string()), "{logged}");
}

#[test]
fn test_build_full_request() {
    temp_env::with_var_unset("MIKE_DOCS_VERSION", || {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), &recording_body(dir.path()));
        let invoker = RedirectingInvoker::new(&options(dir.path()));

        invoker
            .build(
                BuildRequest::new("2.0.0")
                    .config_file("cfg.yml")
                    .quiet(true)
                    .output(BuildOutput::Null),
            )
            .unwrap();

        assert_eq!(
            recorded_args(dir.path()),
            ["--quiet", "build", "--clean", "--config-file", "cfg.yml"]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("version")).unwrap(),
            "2.0.0"
        );
        // Only the child sees the version variable
        assert!(std::env::var_os("MIKE_DOCS_VERSION").is_none());
    });
}

#[test]
fn test_build_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tool(dir.path(), &recording_body(dir.path()));
    let invoker = RedirectingInvoker::new(&options(dir.path()));

    invoker
        .build(BuildRequest::new("1.0").output(BuildOutput::Null))
        .unwrap();

    assert_eq!(recorded_args(dir.path()), ["build", "--clean"]);
}

#[test]
fn test_build_output_to_file() {
    let (dir, invoker) = invoker_with("echo 'building site'\necho 'a warning' >&2");
    let log_path = dir.path().join("build.log");
    let log = fs::File::create(&log_path).unwrap();

    invoker
        .build(BuildRequest::new("1.0").output(BuildOutput::File(log)))
        .unwrap();

    let logged = fs::read_to_string(&log_path).unwrap();
    assert!(logged.contains("building site"));
    assert!(logged.contains("a warning"));
}

#[test]
fn test_build_non_zero_exit() {
    let (_dir, invoker) = invoker_with("exit 1");
    let request = || BuildRequest::new("1.0").output(BuildOutput::Null);

    for _ in 0..2 {
        let err = invoker.build(request()).unwrap_err();
        assert!(matches!(
            err,
            RedirectError::NonZeroExit {
                hook: Hook::Build,
                code: Some(1),
                ..
            }
        ));
        assert_eq!(err.exit_code(), 1);
    }
}

#[test]
fn test_protocol_driver_reports_original_tool_name() {
    let (_dir, invoker) = invoker_with("echo 'update_docs, version 3.4.5'");
    let protocol = ProtocolDriver::new(&RedirectOptions::default());

    let mut out = Vec::new();
    let code = protocol
        .run_with(
            vec![OsString::from("mkdocs"), OsString::from("--version")],
            Hooks::from_toolchain(&invoker),
            &mut out,
        )
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "mkdocs, version 3.4.5\n");
}

#[test]
fn test_binary_version_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_tool(dir.path(), "echo 'update_docs, version 1.2.3'");

    let output = Command::new(env!("CARGO_BIN_EXE_docs-redirect"))
        .arg("--version")
        .env("DOCS_REDIRECT_EXECUTABLE", TOOL)
        .env("DOCS_REDIRECT_SEARCH_DIR", dir.path())
        .env_remove("DOCS_REDIRECT_TOOL_NAME")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "mkdocs, version 1.2.3\n"
    );
}

#[test]
fn test_binary_build_passes_child_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write_tool(dir.path(), "exit 3");

    let status = Command::new(env!("CARGO_BIN_EXE_docs-redirect"))
        .args(["build", "--clean"])
        .env("DOCS_REDIRECT_EXECUTABLE", TOOL)
        .env("DOCS_REDIRECT_SEARCH_DIR", dir.path())
        .env("MIKE_DOCS_VERSION", "1.0")
        .env_remove("DOCS_REDIRECT_VERSION_VAR")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(3));
}

#[test]
fn test_binary_build_without_version_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_tool(dir.path(), &recording_body(dir.path()));

    let status = Command::new(env!("CARGO_BIN_EXE_docs-redirect"))
        .arg("build")
        .env("DOCS_REDIRECT_EXECUTABLE", TOOL)
        .env("DOCS_REDIRECT_SEARCH_DIR", dir.path())
        .env_remove("MIKE_DOCS_VERSION")
        .env_remove("DOCS_REDIRECT_VERSION_VAR")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!dir.path().join("args").exists());
}
