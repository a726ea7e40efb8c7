//! # Apifly
//!
//! Serve one tabular dataset in whatever format the client asks for.
//!
//! A route's data handler returns a list of records. The [`Dispatcher`] wraps it,
//! reads the first entry of the request's `Accept` header, and picks a renderer
//! from the [`RendererRegistry`]: CSV, JSON or HTML out of the box, with a default
//! for `*/*` and for requests that send no `Accept` header at all.
//!
//! ## Feature Flags
//!
//! - `server` (default) - hyper HTTP server, settings, logging and the demo app
//!
//! ## Quick Example
//!
//! ```rust
//! use apifly::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(RendererRegistry::with_builtin_renderers());
//! let handler = Dispatcher::new(registry).wrap(|| {
//!     let mut record = Record::new();
//!     record.insert("a".to_string(), 1.into());
//!     vec![record]
//! });
//!
//! let renderer = handler.resolve(&RequestedType::from_accept("csv")).unwrap();
//! assert_eq!(renderer.media_type(), "text/csv; charset=utf-8");
//! ```

pub mod core {
	pub use apifly_core::*;
}

pub mod http {
	pub use apifly_http::*;
}

pub mod renderers {
	pub use apifly_renderers::*;
}

pub mod negotiation {
	pub use apifly_negotiation::*;
}

#[cfg(feature = "server")]
pub mod server {
	pub use apifly_server::*;
}

pub use apifly_core::{Error, Record, RecordSet, Result};
pub use apifly_http::{Handler, Request, Response};
pub use apifly_negotiation::{DataSource, Dispatcher, NegotiatingHandler, RendererRegistry, RequestedType};
pub use apifly_renderers::{CsvRenderer, HtmlRenderer, JsonRenderer, Renderer};

#[cfg(feature = "server")]
pub use apifly_server::{ApiflyApp, HttpServer, Settings, ShutdownCoordinator};

pub mod prelude {
	pub use crate::{
		CsvRenderer, DataSource, Dispatcher, Error, Handler, HtmlRenderer, JsonRenderer,
		NegotiatingHandler, Record, RecordSet, Renderer, RendererRegistry, Request, RequestedType,
		Response, Result,
	};

	#[cfg(feature = "server")]
	pub use crate::{ApiflyApp, HttpServer, Settings, ShutdownCoordinator};
}
