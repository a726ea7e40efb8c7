//! HTTP request representation.

use bytes::Bytes;
use hyper::header::{ACCEPT, HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri, Version};
use std::net::SocketAddr;

use crate::{Error, Result};

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	/// Creates a new request from its parts.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/");
	/// ```
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			remote_addr: None,
		}
	}

	/// Starts building a `GET /` request.
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Request path without the query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Returns a header value as a string, if present and valid UTF-8.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_http::Request;
	///
	/// let request = Request::builder()
	///     .header("Accept", "text/csv")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.header("accept"), Some("text/csv"));
	/// assert_eq!(request.header("x-missing"), None);
	/// ```
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Raw `Accept` header, if the client sent one.
	pub fn accept(&self) -> Option<&HeaderValue> {
		self.headers.get(ACCEPT)
	}
}

/// Builder for bodiless HTTP/1.1 [`Request`]s.
#[derive(Debug)]
pub struct RequestBuilder {
	method: Method,
	uri: String,
	headers: HeaderMap,
	invalid_header: Option<String>,
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self {
			method: Method::GET,
			uri: "/".to_string(),
			headers: HeaderMap::new(),
			invalid_header: None,
		}
	}
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	/// Appends a header. Invalid names or values make [`RequestBuilder::build`] fail.
	pub fn header(mut self, name: &str, value: &str) -> Self {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				self.headers.append(name, value);
			}
			_ => self.invalid_header = Some(name.to_string()),
		}
		self
	}

	/// Builds the request.
	///
	/// # Errors
	///
	/// Returns [`Error::Http`] if the URI or a header could not be parsed.
	pub fn build(self) -> Result<Request> {
		if let Some(name) = self.invalid_header {
			return Err(Error::Http(format!("invalid header: {}", name)));
		}
		let uri = self
			.uri
			.parse::<Uri>()
			.map_err(|e| Error::Http(format!("invalid uri {:?}: {}", self.uri, e)))?;

		Ok(Request::new(self.method, uri, Version::HTTP_11, self.headers, Bytes::new()))
	}
}
