//! Accept header interpretation
//!
//! Only the first comma-separated entry of the header is consulted. Quality values
//! and later preferences are ignored, so `application/xml, text/html` is a request
//! for `application/xml` and nothing else.

use hyper::HeaderMap;
use hyper::header::ACCEPT;
use std::fmt;

/// The content type a client asked for.
///
/// `Absent` and `Wildcard` are kept apart even though both currently resolve to the
/// registry default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestedType {
	/// No `Accept` header was sent.
	Absent,
	/// The client sent `*/*`.
	Wildcard,
	/// Any other identifier, compared as an opaque string.
	Exact(String),
}

impl RequestedType {
	/// The wildcard identifier.
	pub const WILDCARD: &'static str = "*/*";

	/// Maps an identifier to a key without trimming or validation.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_negotiation::RequestedType;
	///
	/// assert_eq!(RequestedType::from_identifier("*/*"), RequestedType::Wildcard);
	/// assert_eq!(
	///     RequestedType::from_identifier("text/csv"),
	///     RequestedType::Exact("text/csv".to_string())
	/// );
	/// ```
	pub fn from_identifier(identifier: &str) -> Self {
		if identifier == Self::WILDCARD {
			RequestedType::Wildcard
		} else {
			RequestedType::Exact(identifier.to_string())
		}
	}

	/// Interprets an `Accept` header value: first entry only, surrounding
	/// whitespace trimmed.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_negotiation::RequestedType;
	///
	/// assert_eq!(
	///     RequestedType::from_accept("application/xml, text/html"),
	///     RequestedType::Exact("application/xml".to_string())
	/// );
	/// assert_eq!(RequestedType::from_accept(" */* ; q=0.1"), RequestedType::Exact("*/* ; q=0.1".to_string()));
	/// assert_eq!(RequestedType::from_accept("*/*, text/csv"), RequestedType::Wildcard);
	/// ```
	pub fn from_accept(header: &str) -> Self {
		let first = header.split(',').next().unwrap_or_default().trim();
		Self::from_identifier(first)
	}

	/// Reads the first `Accept` header from `headers`.
	///
	/// A value that is not valid visible ASCII is decoded lossily and used as an
	/// opaque key.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		match headers.get(ACCEPT) {
			None => RequestedType::Absent,
			Some(value) => match value.to_str() {
				Ok(value) => Self::from_accept(value),
				Err(_) => Self::from_accept(&String::from_utf8_lossy(value.as_bytes())),
			},
		}
	}

	/// Identifier string, or `None` when no header was sent.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			RequestedType::Absent => None,
			RequestedType::Wildcard => Some(Self::WILDCARD),
			RequestedType::Exact(identifier) => Some(identifier),
		}
	}
}

impl fmt::Display for RequestedType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.as_str() {
			Some(identifier) => f.write_str(identifier),
			None => f.write_str("<no accept header>"),
		}
	}
}

impl From<&str> for RequestedType {
	fn from(identifier: &str) -> Self {
		Self::from_identifier(identifier)
	}
}
