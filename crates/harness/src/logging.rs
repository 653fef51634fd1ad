use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initializes the harness tracing subscriber.
///
/// Idempotent: only the first call installs a subscriber, so every test in
/// a suite may call it from its own fixture.
pub fn init_logging(verbose: bool) {
	// Allow RUST_LOG overrides, fall back to flag-controlled level
	let default_level = if verbose { "debug" } else { "info" };
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	// Log to stderr; keep formatting compact
	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
}
