//! Configuration loading for confpack.
//!
//! This module handles:
//! - TOML config file parsing
//! - Layout defaults and resolution against the repository root

pub mod parser;
pub mod types;

pub use parser::{CONFIG_FILE_NAME, load_config, parse_config_file, parse_config_str};
pub use types::ReleaseConfig;
