//! Confpack - build and publish versioned configuration release packages.
//!
//! This library provides the core functionality for confpack, including:
//! - Loading YAML replacement rules and applying them as literal, fail-fast
//!   substitutions
//! - Assembling a package tree from base, network and docs overlays
//! - Archiving the tree with an external zip tool
//! - Uploading the archive to a generic package registry
//!
//! # Example
//!
//! ```no_run
//! use confpack::config::load_config;
//! use confpack::pipeline::{NetworkType, Pipeline, ReleaseOptions};
//! use std::path::{Path, PathBuf};
//!
//! # async fn build() -> confpack::Result<()> {
//! let config = load_config(Path::new(".."), None)?;
//! let pipeline = Pipeline::from_config(config);
//!
//! let options = ReleaseOptions {
//!     network: NetworkType::HubAndSpoke,
//!     version: "1.4.0".to_string(),
//!     output: PathBuf::from("release-1.4.0.zip"),
//!     replacements: Some(PathBuf::from("replacements.yaml")),
//!     publish: None,
//! };
//!
//! let archive = pipeline.run(&options).await?;
//! println!("Built {}", archive.display());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod publish;
pub mod rules;

pub use error::{ConfpackError, Result};
