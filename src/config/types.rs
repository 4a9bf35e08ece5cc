use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Repository layout and tooling from an optional `confpack.toml`.
///
/// Relative paths are resolved against the repository root passed to
/// [`ReleaseConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReleaseConfig {
	/// Overlay copied first into the package config folder.
	pub base_dir: PathBuf,

	/// Parent of the per-network overlays; the network type name is appended.
	pub network_dir: PathBuf,

	/// Documentation copied into the package `docs` folder.
	pub docs_dir: PathBuf,

	/// Directory under which each run creates its own working tree.
	pub work_dir: PathBuf,

	/// Archiving program, invoked as `<tool> -r -q <output> .`.
	pub archive_tool: String,

	/// Generic package name used in the upload URL.
	pub package_name: String,
}

impl Default for ReleaseConfig {
	fn default() -> Self {
		ReleaseConfig {
			base_dir: PathBuf::from("modules/base/default"),
			network_dir: PathBuf::from("modules/network"),
			docs_dir: PathBuf::from("docs"),
			work_dir: PathBuf::from("modules"),
			archive_tool: "zip".to_string(),
			package_name: "lza-universal-config".to_string(),
		}
	}
}

impl ReleaseConfig {
	/// Return a copy with every directory joined onto `root`.
	///
	/// Absolute entries are kept as they are.
	pub fn resolve(&self, root: &Path) -> ReleaseConfig {
		ReleaseConfig {
			base_dir: root.join(&self.base_dir),
			network_dir: root.join(&self.network_dir),
			docs_dir: root.join(&self.docs_dir),
			work_dir: root.join(&self.work_dir),
			archive_tool: self.archive_tool.clone(),
			package_name: self.package_name.clone(),
		}
	}
}
