//! HTTP server for the Apifly demo.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use apifly_negotiation::RendererRegistry;
//! use apifly_server::{ApiflyApp, HttpServer, ShutdownCoordinator, shutdown_signal};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let registry = Arc::new(RendererRegistry::with_builtin_renderers());
//! let app = Arc::new(ApiflyApp::new(registry));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! let coordinator = ShutdownCoordinator::new(Duration::from_secs(30));
//! let trigger = coordinator.clone();
//! tokio::spawn(async move {
//!     shutdown_signal().await;
//!     trigger.shutdown();
//! });
//!
//! HttpServer::new(app).run(listener, coordinator).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod http;
pub mod logging;
pub mod settings;
pub mod shutdown;

pub use app::{ApiflyApp, INDEX_PATH, sample_records};
pub use http::{HttpServer, ServerResult};
pub use settings::Settings;
pub use shutdown::{ShutdownCoordinator, shutdown_signal, wait_for_request};
