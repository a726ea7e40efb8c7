//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive for the subscriber.
///
/// `-v` flags win (`1` → debug, `2+` → trace), then a non-empty `RUST_LOG`,
/// then the configured level.
///
/// ```
/// use apifly_server::logging::filter_directive;
///
/// assert_eq!(filter_directive("info", 0, None), "info");
/// assert_eq!(filter_directive("info", 0, Some("hyper=warn")), "hyper=warn");
/// assert_eq!(filter_directive("info", 2, Some("hyper=warn")), "trace");
/// ```
pub fn filter_directive(level: &str, verbosity: u8, rust_log: Option<&str>) -> String {
	match verbosity {
		0 => match rust_log {
			Some(directive) if !directive.trim().is_empty() => directive.to_string(),
			_ => level.to_string(),
		},
		1 => "debug".to_string(),
		_ => "trace".to_string(),
	}
}

/// Install the global fmt subscriber.
pub fn init(level: &str, verbosity: u8) -> anyhow::Result<()> {
	let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
	let directive = filter_directive(level, verbosity, rust_log.as_deref());
	let filter = EnvFilter::try_new(&directive)
		.map_err(|e| anyhow::anyhow!("invalid log filter '{}': {}", directive, e))?;

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.try_init()
		.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
