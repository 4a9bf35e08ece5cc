use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use confpack::logging::init_logging;
use confpack::rules::{load_rules, process_config_file, rewrite_config_file};

#[derive(Parser)]
#[command(name = "config-replacer")]
#[command(
	author,
	version,
	about = "Applies pattern-based text replacements to configuration files",
	after_help = "Replacements file format:
  - filename: config-file.yaml
    items:
      - pattern: \"old-text\"
        replacement: \"new-text\""
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Path to folder containing config files to modify
	input_folder: PathBuf,

	/// Path to YAML file containing replacement rules
	replacements_file: PathBuf,

	/// Write modified content to files (default: output to console)
	#[arg(short, long)]
	write: bool,

	/// Suppress status messages
	#[arg(short, long)]
	quiet: bool,

	/// Increase log verbosity
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if !cli.input_folder.exists() {
		anyhow::bail!("Input folder does not exist: {}", cli.input_folder.display());
	}
	if !cli.replacements_file.exists() {
		anyhow::bail!(
			"Replacements file does not exist: {}",
			cli.replacements_file.display()
		);
	}

	let groups = load_rules(&cli.replacements_file).context("Failed to load replacements")?;

	for group in &groups {
		if !cli.quiet {
			println!("Processing: {}", group.filename);
		}

		if cli.write {
			rewrite_config_file(&cli.input_folder, group)
				.with_context(|| format!("Failed to update {}", group.filename))?;
			if !cli.quiet {
				println!("Updated: {}", group.filename);
			}
		} else {
			let modified = process_config_file(&cli.input_folder, group)
				.with_context(|| format!("Failed to process {}", group.filename))?;
			println!("{}", modified);
		}
	}

	Ok(ExitCode::SUCCESS)
}
