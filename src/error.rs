use std::path::PathBuf;

/// Library-level structured errors for confpack.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binaries wrap these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ConfpackError {
	#[error("Failed to read replacements file: {path}")]
	RulesRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse replacements file: {path}")]
	RulesParse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Invalid rule for {file}: {reason}")]
	InvalidRule { file: String, reason: String },

	#[error("Pattern not found in {file}: {pattern}")]
	PatternNotFound { pattern: String, file: PathBuf },

	#[error("Config file does not exist: {path}")]
	TargetNotFound { path: PathBuf },

	#[error("I/O error at {path}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Archive tool failed to start: {tool}")]
	ArchiveSpawn {
		tool: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Archive tool {tool} failed (exit code: {})", exit_code_label(.exit_code))]
	ArchiveFailed { tool: String, exit_code: Option<i32> },

	#[error("Upload transport error: {url}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("Failed to initialize HTTP client")]
	HttpClient {
		#[source]
		source: reqwest::Error,
	},

	#[error("Upload failed: {status} ({url})")]
	UploadRejected { url: String, status: u16 },

	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Required environment variable is not set: {var}")]
	MissingEnv { var: String },

	#[error("network-type must be either hub-and-spoke or shared-vpc, got: {value}")]
	UnknownNetworkType { value: String },
}

impl ConfpackError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		ConfpackError::Io {
			path: path.into(),
			source,
		}
	}
}

fn exit_code_label(code: &Option<i32>) -> String {
	match code {
		Some(code) => code.to_string(),
		None => "terminated by signal".to_string(),
	}
}

/// Result type alias using ConfpackError.
pub type Result<T> = std::result::Result<T, ConfpackError>;
