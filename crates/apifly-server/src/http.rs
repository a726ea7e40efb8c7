use apifly_http::{Handler, Request, Response};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::shutdown::{ShutdownCoordinator, wait_for_request};

pub type ServerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP/1.1 server driving a single [`Handler`]
pub struct HttpServer {
	pub handler: Arc<dyn Handler>,
}

impl HttpServer {
	/// Create a new server with the given handler
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use apifly_server::HttpServer;
	/// use apifly_http::{Handler, Request, Response};
	///
	/// struct MyHandler;
	///
	/// #[async_trait::async_trait]
	/// impl Handler for MyHandler {
	///     async fn handle(&self, _req: Request) -> apifly_core::Result<Response> {
	///         Ok(Response::ok().with_body("Hello"))
	///     }
	/// }
	///
	/// let server = HttpServer::new(Arc::new(MyHandler));
	/// ```
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Serve connections from an already bound listener.
	///
	/// Once shutdown is requested (also before this future is first polled), the
	/// listener is dropped, open connections are asked to finish their current
	/// request, and the server waits for them up to the coordinator's timeout before
	/// aborting the rest.
	pub async fn run(self, listener: TcpListener, coordinator: ShutdownCoordinator) -> ServerResult<()> {
		tracing::info!("Server listening on http://{}", listener.local_addr()?);

		let mut shutdown_rx = coordinator.subscribe();
		let mut connections = JoinSet::new();

		loop {
			tokio::select! {
				biased;

				_ = wait_for_request(&mut shutdown_rx) => {
					tracing::info!("Shutdown signal received, stopping server...");
					break;
				}
				result = listener.accept() => {
					let (stream, socket_addr) = match result {
						Ok(accepted) => accepted,
						Err(err) => {
							tracing::warn!("Failed to accept connection: {}", err);
							continue;
						}
					};
					let handler = self.handler.clone();
					let conn_shutdown = coordinator.subscribe();

					connections.spawn(async move {
						if let Err(err) = Self::handle_connection(stream, socket_addr, handler, conn_shutdown).await {
							tracing::warn!(%socket_addr, "Error handling connection: {:?}", err);
						}
					});
				}
				Some(_) = connections.join_next(), if !connections.is_empty() => {}
			}
		}

		drop(listener);
		let open = connections.len();
		if open > 0 {
			tracing::info!(open, "Waiting for open connections to finish");
		}

		let drained = tokio::time::timeout(coordinator.timeout(), async {
			while connections.join_next().await.is_some() {}
		})
		.await;

		if drained.is_err() {
			tracing::warn!(
				remaining = connections.len(),
				"Shutdown timeout elapsed, aborting remaining connections"
			);
			connections.shutdown().await;
		}

		coordinator.notify_shutdown_complete();
		tracing::info!("Server stopped");

		Ok(())
	}

	/// Serve HTTP/1.1 requests on a single accepted connection.
	///
	/// Once shutdown is requested the connection finishes its in-flight request and
	/// then closes.
	pub async fn handle_connection(
		stream: TcpStream,
		socket_addr: SocketAddr,
		handler: Arc<dyn Handler>,
		mut shutdown: watch::Receiver<bool>,
	) -> ServerResult<()> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr: socket_addr,
		};

		let conn = http1::Builder::new().serve_connection(io, service);
		tokio::pin!(conn);

		tokio::select! {
			result = conn.as_mut() => result?,
			_ = wait_for_request(&mut shutdown) => {
				conn.as_mut().graceful_shutdown();
				conn.await?;
			}
		}

		Ok(())
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let mut request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body_bytes);
			request.remote_addr = Some(remote_addr);

			let method = request.method.clone();
			let path = request.path().to_string();

			let response = handler.handle(request).await.unwrap_or_else(|err| {
				if err.is_client_error() {
					tracing::warn!(%method, %path, error = %err, "request rejected");
				} else {
					tracing::error!(%method, %path, error = %err, "handler failed");
				}
				Response::from(err)
			});
			tracing::debug!(%method, %path, status = response.status.as_u16(), %remote_addr, "request handled");

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (key, value) in response.headers.iter() {
				hyper_response = hyper_response.header(key, value);
			}

			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::time::Duration;

	struct TestHandler;

	#[async_trait::async_trait]
	impl Handler for TestHandler {
		async fn handle(&self, request: Request) -> apifly_core::Result<Response> {
			match request.path() {
				"/fail" => Err(apifly_core::Error::Internal("boom".to_string())),
				_ => Ok(Response::ok().with_body("Hello, World!")),
			}
		}
	}

	async fn spawn_server() -> (SocketAddr, ShutdownCoordinator, tokio::task::JoinHandle<ServerResult<()>>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(2));
		let server = HttpServer::new(Arc::new(TestHandler));
		let task = tokio::spawn(server.run(listener, coordinator.clone()));
		(addr, coordinator, task)
	}

	#[rstest]
	#[tokio::test]
	async fn test_serves_handler_response() {
		let (addr, coordinator, task) = spawn_server().await;

		let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
		assert_eq!(response.status(), 200);
		assert_eq!(response.text().await.unwrap(), "Hello, World!");

		coordinator.shutdown();
		task.await.unwrap().unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_handler_error_becomes_json_response() {
		let (addr, coordinator, task) = spawn_server().await;

		let response = reqwest::get(format!("http://{}/fail", addr)).await.unwrap();
		assert_eq!(response.status(), 500);
		let body: serde_json::Value = response.json().await.unwrap();
		assert_eq!(body["error"], "Internal error: boom");

		coordinator.shutdown();
		task.await.unwrap().unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_shutdown_completes_and_stops_accepting() {
		let (addr, coordinator, task) = spawn_server().await;

		coordinator.shutdown();
		tokio::time::timeout(Duration::from_secs(5), task)
			.await
			.expect("server did not stop")
			.unwrap()
			.unwrap();

		assert!(coordinator.is_shutdown_complete());
		assert!(TcpStream::connect(addr).await.is_err());
	}

	#[rstest]
	#[tokio::test]
	async fn test_shutdown_requested_before_run_is_honoured() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let coordinator = ShutdownCoordinator::new(Duration::from_secs(2));
		coordinator.shutdown();

		let server = HttpServer::new(Arc::new(TestHandler));
		tokio::time::timeout(Duration::from_secs(2), server.run(listener, coordinator.clone()))
			.await
			.expect("early shutdown request was lost")
			.unwrap();

		assert!(coordinator.is_shutdown_complete());
	}
}
