//! Graceful shutdown coordination.
//!
//! A [`ShutdownCoordinator`] is cloned into the accept loop, into every
//! connection task and into whoever triggers the shutdown (usually the
//! signal listener spawned by the binary).

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Carries a shutdown request and reports when draining has finished.
///
/// Both states are latched: a receiver created after [`shutdown`](ShutdownCoordinator::shutdown)
/// still observes the request.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
	timeout: Duration,
	requested: Arc<watch::Sender<bool>>,
	complete: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
	/// Create a coordinator that waits at most `timeout` for open connections.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_server::ShutdownCoordinator;
	/// use std::time::Duration;
	///
	/// let coordinator = ShutdownCoordinator::new(Duration::from_secs(30));
	/// assert_eq!(coordinator.timeout(), Duration::from_secs(30));
	/// assert!(!coordinator.is_shutdown_complete());
	/// ```
	pub fn new(timeout: Duration) -> Self {
		let (requested, _) = watch::channel(false);
		let (complete, _) = watch::channel(false);
		Self {
			timeout,
			requested: Arc::new(requested),
			complete: Arc::new(complete),
		}
	}

	/// Grace period granted to in-flight connections.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Receiver for the shutdown flag; pass it to [`wait_for_request`].
	pub fn subscribe(&self) -> watch::Receiver<bool> {
		self.requested.subscribe()
	}

	/// Ask the server to stop accepting connections.
	pub fn shutdown(&self) {
		self.requested.send_replace(true);
	}

	pub fn is_shutdown_requested(&self) -> bool {
		*self.requested.borrow()
	}

	/// Mark draining as finished and wake every [`wait_for_shutdown`](Self::wait_for_shutdown) caller.
	pub fn notify_shutdown_complete(&self) {
		self.complete.send_replace(true);
	}

	pub fn is_shutdown_complete(&self) -> bool {
		*self.complete.borrow()
	}

	/// Wait until the server reports that draining has finished.
	pub async fn wait_for_shutdown(&self) {
		let mut rx = self.complete.subscribe();
		// The sender lives in `self`, so `wait_for` cannot observe a closed channel here.
		let _ = rx.wait_for(|done| *done).await;
	}
}

/// Resolve once shutdown has been requested, including before this call.
pub async fn wait_for_request(rx: &mut watch::Receiver<bool>) {
	// A closed channel means every coordinator is gone, so treat it as a request.
	let _ = rx.wait_for(|requested| *requested).await;
}

/// Resolve when the process receives Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!("Failed to listen for CTRL-C: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(e) => {
				tracing::error!("Failed to listen for SIGTERM: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => tracing::info!("Received CTRL-C, shutting down gracefully"),
		_ = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
	}
}
