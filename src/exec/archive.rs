use crate::error::{ConfpackError, Result};
use crate::exec::run_command;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;

/// Produces a single archive file from a directory tree.
pub trait Archiver {
	/// Archive the full contents of `tree` (paths relative to `tree`) into
	/// `output`. `output` is absolute and lies outside `tree`.
	fn archive(&self, tree: &Path, output: &Path) -> Result<()>;
}

/// [`Archiver`] that shells out to a zip-compatible tool.
///
/// The tool runs as `<program> -r -q <output> .` with `tree` as its working
/// directory; any non-zero exit is an archive failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipArchiver {
	program: String,
}

impl ZipArchiver {
	pub fn new(program: impl Into<String>) -> Self {
		ZipArchiver {
			program: program.into(),
		}
	}
}

impl Default for ZipArchiver {
	fn default() -> Self {
		ZipArchiver::new("zip")
	}
}

impl Archiver for ZipArchiver {
	fn archive(&self, tree: &Path, output: &Path) -> Result<()> {
		info!(tool = %self.program, output = %output.display(), "creating archive");

		let args = [
			OsStr::new("-r"),
			OsStr::new("-q"),
			output.as_os_str(),
			OsStr::new("."),
		];
		let status =
			run_command(&self.program, args, tree).map_err(|source| ConfpackError::ArchiveSpawn {
				tool: self.program.clone(),
				source,
			})?;

		if !status.success() {
			return Err(ConfpackError::ArchiveFailed {
				tool: self.program.clone(),
				exit_code: status.code(),
			});
		}

		Ok(())
	}
}
