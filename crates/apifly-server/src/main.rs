//! Apifly demo server
//!
//! Serves a sample dataset on `/` as CSV, JSON or HTML depending on the
//! request's `Accept` header.
//!
//! ## Usage
//!
//! ```bash
//! apifly --port 8080 -v
//! apifly --config apifly.toml
//! curl -H 'Accept: text/csv' http://127.0.0.1:5000/
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use apifly_negotiation::RendererRegistry;
use apifly_server::{ApiflyApp, HttpServer, Settings, ShutdownCoordinator, logging, shutdown_signal};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "apifly")]
#[command(about = "Serve a sample dataset with Accept-header content negotiation", long_about = None)]
#[command(version)]
struct Cli {
	/// Address to bind (overrides APIFLY_HOST and the config file)
	#[arg(long, value_name = "HOST")]
	host: Option<String>,

	/// Port to bind (overrides APIFLY_PORT and the config file)
	#[arg(short, long, value_name = "PORT")]
	port: Option<u16>,

	/// Path to a TOML settings file
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Seconds to wait for open connections on shutdown
	#[arg(long, value_name = "SECS")]
	shutdown_timeout: Option<u64>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	fn settings(&self) -> anyhow::Result<Settings> {
		let settings = match &self.config {
			Some(path) => Settings::from_file(path)?,
			None => Settings::default(),
		};
		let mut settings = settings.apply_env()?;
		self.apply_overrides(&mut settings);
		Ok(settings)
	}

	fn apply_overrides(&self, settings: &mut Settings) {
		if let Some(host) = &self.host {
			settings.host = host.clone();
		}
		if let Some(port) = self.port {
			settings.port = port;
		}
		if let Some(secs) = self.shutdown_timeout {
			settings.shutdown_timeout_secs = secs;
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let settings = cli.settings()?;
	logging::init(&settings.log_level, cli.verbose)?;

	let addr = settings.socket_addr()?;
	let registry = Arc::new(RendererRegistry::with_builtin_renderers());
	tracing::debug!(content_types = ?registry.content_types(), "renderers registered");
	let app = Arc::new(ApiflyApp::new(registry));

	let listener = TcpListener::bind(addr)
		.await
		.with_context(|| format!("failed to bind {}", addr))?;

	let coordinator = ShutdownCoordinator::new(settings.shutdown_timeout());
	let trigger = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		trigger.shutdown();
	});

	HttpServer::new(app)
		.run(listener, coordinator)
		.await
		.map_err(|e| anyhow::anyhow!("server error: {}", e))?;

	Ok(())
}
