//! The demo application: one negotiated route serving a fixed dataset.

use apifly_core::{Error, Record, Result};
use apifly_http::{Handler, Request, Response};
use apifly_negotiation::{Dispatcher, NegotiatingHandler, RendererRegistry};
use async_trait::async_trait;
use hyper::Method;
use std::sync::Arc;

pub const INDEX_PATH: &str = "/";

/// `[{a:1,b:2},{a:3,b:4},{a:5,b:6}]`
pub fn sample_records() -> Vec<Record> {
	[(1, 2), (3, 4), (5, 6)]
		.into_iter()
		.map(|(a, b)| {
			let mut record = Record::new();
			record.insert("a".to_string(), a.into());
			record.insert("b".to_string(), b.into());
			record
		})
		.collect()
}

/// Routes requests to the negotiated index handler.
#[derive(Debug)]
pub struct ApiflyApp {
	index: NegotiatingHandler,
}

impl ApiflyApp {
	pub fn new(registry: Arc<RendererRegistry>) -> Self {
		let index = Dispatcher::new(registry)
			.wrap(sample_records)
			.expose_as(["csv", "json", "html"]);
		Self { index }
	}
}

#[async_trait]
impl Handler for ApiflyApp {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.path() != INDEX_PATH {
			return Err(Error::NotFound(request.path().to_string()));
		}

		if request.method != Method::GET && request.method != Method::HEAD {
			return Err(Error::MethodNotAllowed(request.method.to_string()));
		}

		self.index.handle(request).await
	}
}
