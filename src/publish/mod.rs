//! Artifact registry upload for confpack.
//!
//! This module handles:
//! - Upload target configuration (explicit, or from the CI environment)
//! - Single-shot authenticated PUT of the release archive

use crate::error::{ConfpackError, Result};
use reqwest::header::CONTENT_LENGTH;
use std::path::Path;
use tracing::{debug, info};

/// User agent for registry requests.
const USER_AGENT_VALUE: &str = concat!("confpack/", env!("CARGO_PKG_VERSION"));

/// Header carrying the CI job token.
pub const TOKEN_HEADER: &str = "JOB-TOKEN";

pub const ENV_API_URL: &str = "CI_API_V4_URL";
pub const ENV_PROJECT_ID: &str = "CI_PROJECT_ID";
pub const ENV_JOB_TOKEN: &str = "CI_JOB_TOKEN";

/// Where and how to publish a release archive.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishConfig {
	/// Registry API base URL, e.g. `https://gitlab.example.com/api/v4`.
	pub api_url: String,

	/// Project that owns the generic package.
	pub project_id: String,

	/// Job-scoped token sent in the `JOB-TOKEN` header.
	pub job_token: String,

	/// Generic package name (artifact namespace).
	pub package_name: String,
}

impl std::fmt::Debug for PublishConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PublishConfig")
			.field("api_url", &self.api_url)
			.field("project_id", &self.project_id)
			.field("job_token", &"<redacted>")
			.field("package_name", &self.package_name)
			.finish()
	}
}

impl PublishConfig {
	/// Read the upload target from the CI environment.
	pub fn from_env(package_name: impl Into<String>) -> Result<Self> {
		Self::from_lookup(package_name, |var| std::env::var(var).ok())
	}

	/// Build the config from an arbitrary variable lookup.
	///
	/// Unset or empty variables are reported as missing.
	pub fn from_lookup<F>(package_name: impl Into<String>, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let require = |var: &str| {
			lookup(var)
				.filter(|v| !v.is_empty())
				.ok_or_else(|| ConfpackError::MissingEnv {
					var: var.to_string(),
				})
		};

		Ok(PublishConfig {
			api_url: require(ENV_API_URL)?,
			project_id: require(ENV_PROJECT_ID)?,
			job_token: require(ENV_JOB_TOKEN)?,
			package_name: package_name.into(),
		})
	}

	/// URL for uploading `archive` as `version` of the generic package.
	pub fn upload_url(&self, version: &str, archive: &Path) -> String {
		let file_name = archive
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();

		format!(
			"{}/projects/{}/packages/generic/{}/{}/{}",
			self.api_url.trim_end_matches('/'),
			self.project_id,
			self.package_name,
			version,
			file_name
		)
	}
}

/// Uploads release archives over HTTP(S).
#[derive(Debug, Clone)]
pub struct Publisher {
	client: reqwest::Client,
}

impl Publisher {
	pub fn new() -> Result<Self> {
		let client = reqwest::Client::builder()
			.user_agent(USER_AGENT_VALUE)
			.build()
			.map_err(|source| ConfpackError::HttpClient { source })?;

		Ok(Publisher { client })
	}

	/// Stream `file` as the body of a PUT to `url`.
	///
	/// The request carries an explicit `Content-Length` and the token in the
	/// `JOB-TOKEN` header. A status of 400 or above is an upload failure;
	/// connection-level problems are transport failures. Nothing is retried.
	pub async fn upload(&self, file: &Path, url: &str, token: &str) -> Result<()> {
		let handle = tokio::fs::File::open(file)
			.await
			.map_err(|source| ConfpackError::io(file, source))?;
		let size = handle
			.metadata()
			.await
			.map_err(|source| ConfpackError::io(file, source))?
			.len();

		info!(url = %url, bytes = size, "uploading archive");

		let response = self
			.client
			.put(url)
			.header(TOKEN_HEADER, token)
			.header(CONTENT_LENGTH, size)
			.body(reqwest::Body::from(handle))
			.send()
			.await
			.map_err(|source| ConfpackError::Transport {
				url: url.to_string(),
				source,
			})?;

		let status = response.status();
		debug!(url = %url, status = status.as_u16(), "upload response");

		if status.as_u16() >= 400 {
			return Err(ConfpackError::UploadRejected {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}

		Ok(())
	}

	/// Upload `archive` as `version` to the target described by `config`.
	pub async fn publish(&self, config: &PublishConfig, version: &str, archive: &Path) -> Result<String> {
		let url = config.upload_url(version, archive);
		self.upload(archive, &url, &config.job_token).await?;
		Ok(url)
	}
}
