//! Release packaging pipeline for confpack.
//!
//! A run moves through Init, Assemble, Substitute, Archive, Cleanup and
//! Publish in that order and stops at the first error. The working tree is
//! private to the run and is removed whether or not the earlier stages
//! succeeded.

mod network;

pub use network::NetworkType;

use crate::assemble::{FsCopier, PackageSources, TreeCopier, assemble_package};
use crate::config::ReleaseConfig;
use crate::error::{ConfpackError, Result};
use crate::exec::{Archiver, ZipArchiver};
use crate::publish::{PublishConfig, Publisher};
use crate::rules::{load_rules, rewrite_config_file};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Prefix of the per-run working tree directory name.
const WORK_TREE_PREFIX: &str = "confpack-";

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Init,
	Assemble,
	Substitute,
	Archive,
	Cleanup,
	Publish,
}

impl Stage {
	pub fn as_str(&self) -> &'static str {
		match self {
			Stage::Init => "init",
			Stage::Assemble => "assemble",
			Stage::Substitute => "substitute",
			Stage::Archive => "archive",
			Stage::Cleanup => "cleanup",
			Stage::Publish => "publish",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Inputs for a single packaging run.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
	pub network: NetworkType,

	/// Release version, used in the upload URL.
	pub version: String,

	/// Archive path. Relative paths are taken from the current directory.
	pub output: PathBuf,

	/// Replacements document; the Substitute stage is skipped without one.
	pub replacements: Option<PathBuf>,

	/// Upload target; the Publish stage is skipped without one.
	pub publish: Option<PublishConfig>,
}

/// Sequences assembly, substitution, archiving, cleanup and upload.
///
/// Copying and archiving go through [`TreeCopier`] and [`Archiver`] so the
/// sequencing can be exercised without a zip tool on the machine.
#[derive(Debug)]
pub struct Pipeline<C, A> {
	config: ReleaseConfig,
	copier: C,
	archiver: A,
}

impl Pipeline<FsCopier, ZipArchiver> {
	/// Pipeline backed by the real filesystem and the configured archive tool.
	pub fn from_config(config: ReleaseConfig) -> Self {
		let archiver = ZipArchiver::new(config.archive_tool.clone());
		Pipeline::new(config, FsCopier, archiver)
	}
}

impl<C: TreeCopier, A: Archiver> Pipeline<C, A> {
	pub fn new(config: ReleaseConfig, copier: C, archiver: A) -> Self {
		Pipeline {
			config,
			copier,
			archiver,
		}
	}

	/// Source directories for a network type.
	pub fn sources(&self, network: NetworkType) -> PackageSources {
		PackageSources {
			base: self.config.base_dir.clone(),
			network: self.config.network_dir.join(network.as_str()),
			docs: self.config.docs_dir.clone(),
		}
	}

	/// Run every stage, uploading the archive when a publish target is set.
	///
	/// Returns the absolute path of the archive.
	pub async fn run(&self, options: &ReleaseOptions) -> Result<PathBuf> {
		let archive = self.build(options)?;

		if let Some(ref target) = options.publish {
			info!(stage = %Stage::Publish, "entering stage");
			let url = Publisher::new()?
				.publish(target, &options.version, &archive)
				.await?;
			info!(url = %url, "published archive");
		}

		Ok(archive)
	}

	/// Run Init through Cleanup and return the absolute archive path.
	pub fn build(&self, options: &ReleaseOptions) -> Result<PathBuf> {
		let output = absolute_output(&options.output)?;

		info!(stage = %Stage::Init, work_dir = %self.config.work_dir.display(), "entering stage");
		std::fs::create_dir_all(&self.config.work_dir)
			.map_err(|source| ConfpackError::io(&self.config.work_dir, source))?;
		let tree = tempfile::Builder::new()
			.prefix(WORK_TREE_PREFIX)
			.tempdir_in(&self.config.work_dir)
			.map_err(|source| ConfpackError::io(&self.config.work_dir, source))?;
		let tree_path = tree.path().to_path_buf();
		debug!(tree = %tree_path.display(), "created working tree");

		let outcome = self.package(&tree_path, options, &output);

		info!(stage = %Stage::Cleanup, "entering stage");
		let cleanup = tree.close();

		match (outcome, cleanup) {
			(Ok(()), Ok(())) => Ok(output),
			(Ok(()), Err(err)) => {
				warn!(tree = %tree_path.display(), error = %err, "failed to remove working tree");
				Ok(output)
			}
			(Err(err), Ok(())) => Err(err),
			(Err(err), Err(cleanup_err)) => {
				warn!(tree = %tree_path.display(), error = %cleanup_err, "failed to remove working tree");
				Err(err)
			}
		}
	}

	/// Assemble, Substitute and Archive inside an existing working tree.
	fn package(&self, tree: &Path, options: &ReleaseOptions, output: &Path) -> Result<()> {
		info!(stage = %Stage::Assemble, network = %options.network, "entering stage");
		let config_dir = assemble_package(&self.copier, &self.sources(options.network), tree)?;

		if let Some(ref replacements) = options.replacements {
			info!(stage = %Stage::Substitute, rules = %replacements.display(), "entering stage");
			let groups = load_rules(replacements)?;
			for group in &groups {
				let path = rewrite_config_file(&config_dir, group)?;
				info!(file = %path.display(), items = group.items.len(), "updated");
			}
		}

		info!(stage = %Stage::Archive, "entering stage");
		prepare_output(output)?;
		self.archiver.archive(tree, output)
	}
}

fn absolute_output(output: &Path) -> Result<PathBuf> {
	if output.is_absolute() {
		return Ok(output.to_path_buf());
	}
	let cwd = std::env::current_dir().map_err(|source| ConfpackError::io(".", source))?;
	Ok(cwd.join(output))
}

/// Make sure the archive starts from nothing and its folder exists.
fn prepare_output(output: &Path) -> Result<()> {
	if let Some(parent) = output.parent() {
		std::fs::create_dir_all(parent).map_err(|source| ConfpackError::io(parent, source))?;
	}

	match std::fs::remove_file(output) {
		Ok(()) => {
			debug!(output = %output.display(), "removed previous archive");
			Ok(())
		}
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
		Err(source) => Err(ConfpackError::io(output, source)),
	}
}
