//! Package tree assembly for confpack.
//!
//! This module handles:
//! - Recursive directory copies (overlays)
//! - Composing the package tree from base, network and docs sources

use crate::error::{ConfpackError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Subfolder of the package tree holding the merged configuration.
pub const CONFIG_SUBDIR: &str = "config";

/// Subfolder of the package tree holding the documentation.
pub const DOCS_SUBDIR: &str = "docs";

/// Copies a directory tree onto a destination.
///
/// Files already present at the same relative path are overwritten, which is
/// what makes a later copy behave as an overlay.
pub trait TreeCopier {
	fn copy_tree(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// [`TreeCopier`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCopier;

impl TreeCopier for FsCopier {
	fn copy_tree(&self, src: &Path, dest: &Path) -> Result<()> {
		copy_tree(src, dest)
	}
}

/// Recursively copy `src` into `dest`, creating `dest` as needed.
///
/// Only byte content and relative structure are carried over. A failure part
/// way through leaves whatever was already copied in place.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
	let meta = std::fs::metadata(src).map_err(|source| ConfpackError::io(src, source))?;
	if !meta.is_dir() {
		return Err(ConfpackError::io(
			src,
			std::io::Error::new(std::io::ErrorKind::NotADirectory, "source is not a directory"),
		));
	}

	std::fs::create_dir_all(dest).map_err(|source| ConfpackError::io(dest, source))?;

	for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
		let entry = entry.map_err(|err| {
			let path = err.path().unwrap_or(src).to_path_buf();
			let source = err
				.into_io_error()
				.unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
			ConfpackError::Io { path, source }
		})?;

		let relative = entry
			.path()
			.strip_prefix(src)
			.map_err(|_| ConfpackError::io(entry.path(), std::io::Error::other("entry outside source")))?;
		let target = dest.join(relative);

		if entry.file_type().is_dir() {
			std::fs::create_dir_all(&target).map_err(|source| ConfpackError::io(&target, source))?;
		} else {
			debug!(from = %entry.path().display(), to = %target.display(), "copying file");
			std::fs::copy(entry.path(), &target)
				.map_err(|source| ConfpackError::io(entry.path(), source))?;
		}
	}

	Ok(())
}

/// Source directories that make up one release package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSources {
	/// Defaults shared by every network type.
	pub base: PathBuf,

	/// Network-specific overlay, copied over `base`.
	pub network: PathBuf,

	/// Documentation shipped alongside the configuration.
	pub docs: PathBuf,
}

/// Build the package tree under `root`.
///
/// Copies happen in a fixed order: base overlay, network overlay (both into
/// `config/`), then docs into `docs/`. Returns the `config/` folder, which is
/// where replacement rules are applied.
pub fn assemble_package<C: TreeCopier + ?Sized>(
	copier: &C,
	sources: &PackageSources,
	root: &Path,
) -> Result<PathBuf> {
	let config_dir = root.join(CONFIG_SUBDIR);
	let docs_dir = root.join(DOCS_SUBDIR);

	info!(source = %sources.base.display(), "copying base overlay");
	copier.copy_tree(&sources.base, &config_dir)?;

	info!(source = %sources.network.display(), "copying network overlay");
	copier.copy_tree(&sources.network, &config_dir)?;

	info!(source = %sources.docs.display(), "copying docs");
	copier.copy_tree(&sources.docs, &docs_dir)?;

	Ok(config_dir)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::fs;

	fn write(path: &Path, content: &str) {
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, content).unwrap();
	}

	#[test]
	fn test_copy_tree_preserves_structure_and_bytes() {
		let src = tempfile::tempdir().unwrap();
		let dest = tempfile::tempdir().unwrap();
		write(&src.path().join("a.yaml"), "a: 1\n");
		write(&src.path().join("nested/deeper/b.yaml"), "b: 2\n");
		fs::write(src.path().join("bin.dat"), [0u8, 159, 146, 150, 255]).unwrap();
		fs::create_dir_all(src.path().join("empty")).unwrap();

		let target = dest.path().join("out/config");
		copy_tree(src.path(), &target).unwrap();

		for entry in WalkDir::new(src.path()).min_depth(1) {
			let entry = entry.unwrap();
			let relative = entry.path().strip_prefix(src.path()).unwrap();
			let copied = target.join(relative);
			if entry.file_type().is_dir() {
				assert!(copied.is_dir(), "missing dir {}", copied.display());
			} else {
				assert_eq!(fs::read(entry.path()).unwrap(), fs::read(&copied).unwrap());
			}
		}
	}

	#[test]
	fn test_copy_tree_missing_source() {
		let dest = tempfile::tempdir().unwrap();
		let result = copy_tree(Path::new("/nonexistent/source"), dest.path());
		match result.unwrap_err() {
			ConfpackError::Io { path, source } => {
				assert_eq!(path, PathBuf::from("/nonexistent/source"));
				assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
			}
			other => panic!("Expected Io error, got {other:?}"),
		}
	}

	#[test]
	fn test_copy_tree_source_is_file() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("file.txt");
		fs::write(&file, "x").unwrap();

		let result = copy_tree(&file, &dir.path().join("dest"));
		assert!(matches!(result, Err(ConfpackError::Io { .. })));
	}

	#[test]
	fn test_overlay_wins_on_same_path() {
		let base = tempfile::tempdir().unwrap();
		let network = tempfile::tempdir().unwrap();
		let docs = tempfile::tempdir().unwrap();
		let out = tempfile::tempdir().unwrap();

		write(&base.path().join("x.yaml"), "v: 1");
		write(&base.path().join("only-base.yaml"), "base");
		write(&network.path().join("x.yaml"), "v: 2");
		write(&docs.path().join("README.md"), "# docs");

		let sources = PackageSources {
			base: base.path().to_path_buf(),
			network: network.path().to_path_buf(),
			docs: docs.path().to_path_buf(),
		};
		let config_dir = assemble_package(&FsCopier, &sources, out.path()).unwrap();

		assert_eq!(config_dir, out.path().join(CONFIG_SUBDIR));
		assert_eq!(fs::read_to_string(config_dir.join("x.yaml")).unwrap(), "v: 2");
		assert_eq!(
			fs::read_to_string(config_dir.join("only-base.yaml")).unwrap(),
			"base"
		);
		assert_eq!(
			fs::read_to_string(out.path().join(DOCS_SUBDIR).join("README.md")).unwrap(),
			"# docs"
		);
	}

	struct RecordingCopier {
		calls: RefCell<Vec<(PathBuf, PathBuf)>>,
	}

	impl TreeCopier for RecordingCopier {
		fn copy_tree(&self, src: &Path, dest: &Path) -> Result<()> {
			self.calls
				.borrow_mut()
				.push((src.to_path_buf(), dest.to_path_buf()));
			Ok(())
		}
	}

	#[test]
	fn test_assemble_order() {
		let copier = RecordingCopier {
			calls: RefCell::new(Vec::new()),
		};
		let sources = PackageSources {
			base: PathBuf::from("/repo/base"),
			network: PathBuf::from("/repo/network/shared-vpc"),
			docs: PathBuf::from("/repo/docs"),
		};

		assemble_package(&copier, &sources, Path::new("/work")).unwrap();

		assert_eq!(
			copier.calls.into_inner(),
			vec![
				(PathBuf::from("/repo/base"), PathBuf::from("/work/config")),
				(
					PathBuf::from("/repo/network/shared-vpc"),
					PathBuf::from("/work/config")
				),
				(PathBuf::from("/repo/docs"), PathBuf::from("/work/docs")),
			]
		);
	}
}
