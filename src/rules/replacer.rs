use crate::error::{ConfpackError, Result};
use crate::rules::normalize::clean_quotes;
use crate::rules::types::{RuleGroup, RuleItem};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Apply replacements to `content` in order.
///
/// Every item must find its (normalized) pattern in the current content,
/// otherwise the whole call fails and no later item is applied. All
/// non-overlapping occurrences are replaced. `file` is only used to name the
/// target in errors.
pub fn apply_replacements(content: &str, items: &[RuleItem], file: &Path) -> Result<String> {
	let mut result = content.to_string();

	for item in items {
		let pattern = clean_quotes(&item.pattern);
		let replacement = clean_quotes(&item.replacement);

		if pattern.is_empty() {
			return Err(ConfpackError::InvalidRule {
				file: file.display().to_string(),
				reason: "pattern is empty".to_string(),
			});
		}

		if !result.contains(&pattern) {
			return Err(ConfpackError::PatternNotFound {
				pattern,
				file: file.to_path_buf(),
			});
		}

		debug!(file = %file.display(), pattern = %pattern, "applying replacement");
		result = result.replace(&pattern, &replacement);
	}

	Ok(result)
}

/// Resolve a group's filename inside `root`.
///
/// Absolute paths and `..` components are rejected so a rule can never touch
/// a file outside the folder being rewritten.
pub fn resolve_target(root: &Path, filename: &str) -> Result<PathBuf> {
	let relative = Path::new(filename);
	let escapes = relative
		.components()
		.any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

	if filename.is_empty() || escapes {
		return Err(ConfpackError::InvalidRule {
			file: filename.to_string(),
			reason: "filename must be a relative path inside the config folder".to_string(),
		});
	}

	Ok(root.join(relative))
}

/// Read the group's target file from `root` and return the rewritten content.
pub fn process_config_file(root: &Path, group: &RuleGroup) -> Result<String> {
	let path = resolve_target(root, &group.filename)?;

	let content = std::fs::read_to_string(&path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			ConfpackError::TargetNotFound { path: path.clone() }
		} else {
			ConfpackError::io(&path, source)
		}
	})?;

	apply_replacements(&content, &group.items, &path)
}

/// Rewrite the group's target file in place. Returns the path written.
pub fn rewrite_config_file(root: &Path, group: &RuleGroup) -> Result<PathBuf> {
	let modified = process_config_file(root, group)?;
	let path = resolve_target(root, &group.filename)?;
	std::fs::write(&path, modified).map_err(|source| ConfpackError::io(&path, source))?;
	Ok(path)
}
