//! Integration test utilities for Apifly
//!
//! Spawns real servers on an ephemeral port and provides small helpers for
//! building records and issuing requests with a given `Accept` header.

use apifly::prelude::*;
use apifly::server::ServerResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server bound to `127.0.0.1:0` that shuts down when dropped.
pub struct TestServerGuard {
	/// Server URL (e.g., "http://127.0.0.1:12345")
	pub url: String,
	pub coordinator: ShutdownCoordinator,
	server_task: Option<JoinHandle<ServerResult<()>>>,
}

impl TestServerGuard {
	pub async fn spawn(handler: Arc<dyn Handler>) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0")
			.await
			.expect("Failed to bind to address");
		let url = format!("http://{}", listener.local_addr().expect("Failed to get local address"));

		let coordinator = ShutdownCoordinator::new(Duration::from_secs(5));
		let server_task = tokio::spawn(HttpServer::new(handler).run(listener, coordinator.clone()));

		Self {
			url,
			coordinator,
			server_task: Some(server_task),
		}
	}

	/// The demo application with the built-in renderers.
	pub async fn spawn_demo() -> Self {
		let registry = Arc::new(RendererRegistry::with_builtin_renderers());
		Self::spawn(Arc::new(ApiflyApp::new(registry))).await
	}

	/// GET `path`, optionally with an `Accept` header.
	pub async fn get(&self, path: &str, accept: Option<&str>) -> reqwest::Response {
		let mut request = reqwest::Client::new().get(format!("{}{}", self.url, path));
		if let Some(accept) = accept {
			request = request.header(reqwest::header::ACCEPT, accept);
		}
		request.send().await.expect("request failed")
	}

	/// Trigger shutdown and wait for the server to drain.
	pub async fn shutdown(mut self) {
		self.coordinator.shutdown();
		if let Some(task) = self.server_task.take() {
			task.await.expect("server task panicked").expect("server failed");
		}
	}
}

impl Drop for TestServerGuard {
	fn drop(&mut self) {
		self.coordinator.shutdown();
		if let Some(task) = self.server_task.take() {
			task.abort();
		}
	}
}

/// Build a record from `(field, value)` pairs, keeping their order.
pub fn record<I, K, V>(fields: I) -> Record
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<serde_json::Value>,
{
	fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Data source that always fails.
pub struct FailingSource;

#[async_trait::async_trait]
impl DataSource for FailingSource {
	async fn fetch(&self) -> Result<Vec<Record>> {
		Err(Error::DataSource("backend unavailable".to_string()))
	}
}
