//! Subprocess execution for confpack.
//!
//! This module handles:
//! - Running external tools with inherited stdio
//! - The archiving capability used by the packaging pipeline

pub mod archive;

pub use archive::{Archiver, ZipArchiver};

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Run a program to completion in `cwd`.
///
/// stdout and stderr pass through to the parent; stdin is closed so a tool
/// waiting for input cannot hang the run.
pub fn run_command<I, S>(program: &str, args: I, cwd: &Path) -> std::io::Result<ExitStatus>
where
	I: IntoIterator<Item = S>,
	S: AsRef<OsStr>,
{
	let mut cmd = Command::new(program);
	cmd.args(args)
		.current_dir(cwd)
		.stdin(Stdio::null())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	debug!(command = ?cmd, "running command");
	cmd.status()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(unix)]
	#[test]
	fn test_run_command_success() {
		let dir = tempfile::tempdir().unwrap();
		let status = run_command("sh", ["-c", "exit 0"], dir.path()).unwrap();
		assert!(status.success());
	}

	#[cfg(unix)]
	#[test]
	fn test_run_command_exit_code() {
		let dir = tempfile::tempdir().unwrap();
		let status = run_command("sh", ["-c", "exit 3"], dir.path()).unwrap();
		assert_eq!(status.code(), Some(3));
	}

	#[cfg(unix)]
	#[test]
	fn test_run_command_uses_cwd() {
		let dir = tempfile::tempdir().unwrap();
		let status = run_command("sh", ["-c", "touch marker"], dir.path()).unwrap();
		assert!(status.success());
		assert!(dir.path().join("marker").exists());
	}

	#[test]
	fn test_run_command_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let err = run_command("/nonexistent/path/to/binary", Vec::<&str>::new(), dir.path())
			.unwrap_err();
		assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
	}
}
