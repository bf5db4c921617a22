use tracing_subscriber::EnvFilter;

/// Maps `-v` counts onto an env-filter default; `RUST_LOG` wins when set.
pub fn init(verbosity: u8) {
	let fallback = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.compact()
		.init();
}
