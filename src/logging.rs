//! Logging setup shared by the confpack binaries.

use tracing_subscriber::EnvFilter;

/// Map a `--verbose` count to a filter directive.
pub fn level_for(verbose: u8) -> &'static str {
	match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Install the global subscriber.
///
/// Logs go to stderr so stdout stays free for command output. `RUST_LOG`
/// takes precedence over the verbosity flag when set.
pub fn init_logging(verbose: u8) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose >= 2)
		.with_line_number(verbose >= 3)
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_level_for() {
		assert_eq!(level_for(0), "warn");
		assert_eq!(level_for(1), "info");
		assert_eq!(level_for(2), "debug");
		assert_eq!(level_for(3), "trace");
		assert_eq!(level_for(9), "trace");
	}
}
