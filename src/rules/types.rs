use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Substitutions for a single target file.
///
/// Groups are processed in document order. The same filename may appear in
/// more than one group; each occurrence reads and rewrites the file again.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleGroup {
	/// Path of the target file, relative to the folder being rewritten.
	pub filename: String,

	/// Replacements applied in order, each to the output of the previous one.
	/// Must contain at least one item.
	#[serde(deserialize_with = "non_empty_items")]
	pub items: Vec<RuleItem>,
}

/// A literal pattern and the text that replaces every occurrence of it.
///
/// Both fields must be YAML strings; `null`, `~`, numbers and booleans are
/// rejected instead of being turned into their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleItem {
	#[serde(deserialize_with = "strict_string")]
	pub pattern: String,

	#[serde(deserialize_with = "strict_string")]
	pub replacement: String,
}

impl RuleItem {
	pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
		RuleItem {
			pattern: pattern.into(),
			replacement: replacement.into(),
		}
	}
}

fn non_empty_items<'de, D>(deserializer: D) -> Result<Vec<RuleItem>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Vec<RuleItem>>::deserialize(deserializer)? {
		Some(items) if !items.is_empty() => Ok(items),
		_ => Err(D::Error::custom("items must be a non-empty list")),
	}
}

fn strict_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match serde_yaml::Value::deserialize(deserializer)? {
		serde_yaml::Value::String(s) => Ok(s),
		serde_yaml::Value::Null => Err(D::Error::custom("expected a string, found null")),
		serde_yaml::Value::Bool(_) => Err(D::Error::custom("expected a string, found a boolean")),
		serde_yaml::Value::Number(_) => Err(D::Error::custom(
			"expected a string, found a number (quote it to match literally)",
		)),
		_ => Err(D::Error::custom("expected a string")),
	}
}
