//! Negotiating handler
//!
//! [`Dispatcher::wrap`] turns a plain data source into a [`Handler`] that picks a
//! renderer from the request's `Accept` header:
//!
//! ```text
//! Request → RequestedType → registry lookup → DataSource::fetch → RecordSet → Renderer → Response
//!                                 ↓                                  ↓            ↓
//!                               406                                 500          500
//! ```

use apifly_core::exception::{Error, Result};
use apifly_core::record::{Record, RecordSet};
use apifly_http::{Handler, Request, Response};
use apifly_renderers::Renderer;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::accept::RequestedType;
use crate::registry::{RendererRegistry, canonical_media_type};

/// Produces the raw records behind a negotiated route.
#[async_trait]
pub trait DataSource: Send + Sync {
	/// Fetches the records to render.
	///
	/// # Errors
	///
	/// Implementations backed by real queries report failures as
	/// [`Error::DataSource`].
	async fn fetch(&self) -> Result<Vec<Record>>;
}

/// Plain functions and closures returning records are data sources.
#[async_trait]
impl<F> DataSource for F
where
	F: Fn() -> Vec<Record> + Send + Sync,
{
	async fn fetch(&self) -> Result<Vec<Record>> {
		Ok(self())
	}
}

/// Builds negotiating handlers that share one registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
	registry: Arc<RendererRegistry>,
}

impl Dispatcher {
	pub fn new(registry: Arc<RendererRegistry>) -> Self {
		Self { registry }
	}

	/// Wraps `source` into a content-negotiating handler.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_core::Record;
	/// use apifly_http::{Handler, Request};
	/// use apifly_negotiation::{Dispatcher, RendererRegistry};
	/// use serde_json::json;
	/// use std::sync::Arc;
	///
	/// fn rows() -> Vec<Record> {
	///     vec![json!({"a": 1, "b": 2}).as_object().unwrap().clone()]
	/// }
	///
	/// # tokio_test::block_on(async {
	/// let dispatcher = Dispatcher::new(Arc::new(RendererRegistry::with_builtin_renderers()));
	/// let handler = dispatcher.wrap(rows);
	///
	/// let request = Request::builder().header("Accept", "text/csv").build().unwrap();
	/// let response = handler.handle(request).await.unwrap();
	/// assert_eq!(response.body, "a (N),b (N)\n1,2");
	/// # });
	/// ```
	pub fn wrap<S>(&self, source: S) -> NegotiatingHandler
	where
		S: DataSource + 'static,
	{
		NegotiatingHandler {
			registry: Arc::clone(&self.registry),
			source: Arc::new(source),
			exposed: None,
		}
	}
}

/// Handler that renders its data source in the format the client asked for.
pub struct NegotiatingHandler {
	registry: Arc<RendererRegistry>,
	source: Arc<dyn DataSource>,
	exposed: Option<HashSet<RequestedType>>,
}

impl NegotiatingHandler {
	/// Restricts the identifiers this route answers for.
	///
	/// Aliases are normalised to their canonical MIME type. A registered type that is
	/// not exposed is treated like an unregistered one and falls back to the default.
	/// `*/*` and a missing header always resolve to the default.
	pub fn expose_as<I, T>(mut self, content_types: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: AsRef<str>,
	{
		let exposed = content_types
			.into_iter()
			.flat_map(|content_type| {
				let content_type = content_type.as_ref();
				let mut keys = vec![RequestedType::from_identifier(content_type)];
				if let Some(canonical) = canonical_media_type(content_type) {
					keys.push(RequestedType::from_identifier(canonical));
				}
				keys
			})
			.collect();
		self.exposed = Some(exposed);
		self
	}

	fn is_exposed(&self, requested: &RequestedType) -> bool {
		match (&self.exposed, requested) {
			(Some(exposed), RequestedType::Exact(_)) => exposed.contains(requested),
			_ => true,
		}
	}

	/// Picks the renderer for `requested`.
	///
	/// # Errors
	///
	/// Returns [`Error::UnsupportedContentType`] when neither an exposed exact match
	/// nor a default renderer exists.
	pub fn resolve(&self, requested: &RequestedType) -> Result<Arc<dyn Renderer>> {
		let renderer = if self.is_exposed(requested) {
			self.registry.lookup(requested)
		} else {
			tracing::debug!(%requested, "content type not exposed by this route");
			self.registry.default_renderer()
		};

		renderer.ok_or_else(|| Error::UnsupportedContentType(requested.to_string()))
	}

	async fn negotiate(&self, requested: &RequestedType) -> Result<Response> {
		let renderer = self.resolve(requested)?;
		tracing::debug!(%requested, format = renderer.format(), "negotiated renderer");

		let records = RecordSet::new(self.source.fetch().await?)?;
		let body = renderer.render(&records)?;

		Ok(Response::ok()
			.with_content_type(renderer.media_type())
			.with_body(body))
	}
}

#[async_trait]
impl Handler for NegotiatingHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let requested = RequestedType::from_headers(&request.headers);

		let response = match self.negotiate(&requested).await {
			Ok(response) => response,
			Err(err) if err.is_client_error() => {
				tracing::warn!(%requested, error = %err, "content negotiation failed");
				Response::from(err)
			}
			Err(err) => {
				tracing::error!(%requested, error = %err, "failed to produce response");
				Response::from(err)
			}
		};

		Ok(response)
	}
}

impl std::fmt::Debug for NegotiatingHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NegotiatingHandler")
			.field("registry", &self.registry)
			.field("exposed", &self.exposed)
			.finish_non_exhaustive()
	}
}
