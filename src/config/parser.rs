use crate::config::types::ReleaseConfig;
use crate::error::{ConfpackError, Result};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "confpack.toml";

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<ReleaseConfig> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfpackError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<ReleaseConfig> {
	toml::from_str(content).map_err(|source| ConfpackError::ConfigParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Load the release config for a repository.
///
/// An explicit path must exist. Without one, `<root>/confpack.toml` is used
/// when present and the built-in defaults otherwise. The returned config is
/// resolved against `root`.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ReleaseConfig> {
	let config = match explicit {
		Some(path) => parse_config_file(path)?,
		None => {
			let default_path: PathBuf = root.join(CONFIG_FILE_NAME);
			if default_path.exists() {
				parse_config_file(&default_path)?
			} else {
				ReleaseConfig::default()
			}
		}
	};

	Ok(config.resolve(root))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("confpack.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config, ReleaseConfig::default());
		assert_eq!(config.archive_tool, "zip");
		assert_eq!(config.package_name, "lza-universal-config");
	}

	#[test]
	fn test_parse_partial_config() {
		let content = r#"
archive-tool = "/usr/local/bin/zip"
docs-dir = "documentation"
"#;
		let path = PathBuf::from("confpack.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.archive_tool, "/usr/local/bin/zip");
		assert_eq!(config.docs_dir, PathBuf::from("documentation"));
		assert_eq!(config.base_dir, PathBuf::from("modules/base/default"));
	}

	#[test]
	fn test_parse_invalid_toml() {
		let result = parse_config_str("archive-tool = [", Path::new("confpack.toml"));
		assert!(matches!(result, Err(ConfpackError::ConfigParse { .. })));
	}

	#[test]
	fn test_resolve_against_root() {
		let config = ReleaseConfig::default().resolve(Path::new("/repo"));

		assert_eq!(config.base_dir, PathBuf::from("/repo/modules/base/default"));
		assert_eq!(config.network_dir, PathBuf::from("/repo/modules/network"));
		assert_eq!(config.docs_dir, PathBuf::from("/repo/docs"));
		assert_eq!(config.work_dir, PathBuf::from("/repo/modules"));
	}

	#[test]
	fn test_load_config_defaults_without_file() {
		let dir = tempfile::tempdir().unwrap();
		let config = load_config(dir.path(), None).unwrap();
		assert_eq!(config.docs_dir, dir.path().join("docs"));
	}

	#[test]
	fn test_load_config_from_root_file() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join(CONFIG_FILE_NAME), "work-dir = \"build\"\n").unwrap();

		let config = load_config(dir.path(), None).unwrap();
		assert_eq!(config.work_dir, dir.path().join("build"));
	}

	#[test]
	fn test_load_config_explicit_missing() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("nope.toml");
		let result = load_config(dir.path(), Some(&missing));
		assert!(matches!(result, Err(ConfpackError::ConfigRead { .. })));
	}
}
