use crate::error::{ConfpackError, Result};
use crate::rules::types::RuleGroup;
use std::path::Path;

/// Load a replacements document from the given path.
pub fn load_rules(path: &Path) -> Result<Vec<RuleGroup>> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfpackError::RulesRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rules_str(&content, path)
}

/// Parse a replacements document from a string (useful for testing).
///
/// Only the shape is checked here. Whether targets exist and patterns match
/// is decided when the rules are applied.
pub fn parse_rules_str(content: &str, path: &Path) -> Result<Vec<RuleGroup>> {
	serde_yaml::from_str(content).map_err(|source| ConfpackError::RulesParse {
		path: path.to_path_buf(),
		source,
	})
}
