//! Replacement rules for confpack.
//!
//! This module handles:
//! - Loading the YAML replacements document
//! - Quote normalization of patterns and replacements
//! - Ordered, fail-fast literal substitution in target files

pub mod normalize;
pub mod parser;
pub mod replacer;
pub mod types;

pub use normalize::clean_quotes;
pub use parser::{load_rules, parse_rules_str};
pub use replacer::{apply_replacements, process_config_file, resolve_target, rewrite_config_file};
pub use types::{RuleGroup, RuleItem};
