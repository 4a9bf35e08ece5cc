use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use confpack::config::load_config;
use confpack::logging::init_logging;
use confpack::pipeline::{NetworkType, Pipeline, ReleaseOptions};
use confpack::publish::PublishConfig;

#[derive(Parser)]
#[command(name = "release-package")]
#[command(
	author,
	about = "Builds and uploads LZA Universal Configuration release packages"
)]
#[command(disable_version_flag = true)]
struct Cli {
	/// Network configuration type (hub-and-spoke or shared-vpc)
	#[arg(short = 'n', long, value_name = "TYPE")]
	network_type: NetworkType,

	/// Release version
	#[arg(short = 'v', long)]
	version: String,

	/// Output archive path
	#[arg(short, long, value_name = "PATH")]
	output: PathBuf,

	/// YAML file with config replacements
	#[arg(short, long, value_name = "FILE")]
	replacements: Option<PathBuf>,

	/// Upload the package to the GitLab generic package registry
	#[arg(short, long)]
	upload: bool,

	/// Repository root holding modules/ and docs/
	#[arg(long, value_name = "DIR", default_value = "..")]
	root: PathBuf,

	/// Layout config file (defaults to <root>/confpack.toml when present)
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Increase log verbosity (-v is taken by --version, so repeat --verbose)
	#[arg(long, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
	match run().await {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

async fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let config =
		load_config(&cli.root, cli.config.as_deref()).context("Failed to load configuration")?;

	// Resolve the upload target before doing any work so a missing CI
	// variable fails the run up front.
	let publish = if cli.upload {
		let target = PublishConfig::from_env(config.package_name.clone())
			.context("Upload requested but the CI environment is incomplete")?;
		Some(target)
	} else {
		None
	};

	let options = ReleaseOptions {
		network: cli.network_type,
		version: cli.version,
		output: cli.output,
		replacements: cli.replacements,
		publish,
	};

	let pipeline = Pipeline::from_config(config);
	let archive = pipeline
		.run(&options)
		.await
		.context("Failed to build release package")?;

	println!("Created {}", archive.display());
	if options.publish.is_some() {
		println!("Uploaded {} ({})", archive.display(), options.version);
	}

	Ok(ExitCode::SUCCESS)
}
