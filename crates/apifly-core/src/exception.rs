//! Error type shared by every Apifly crate.

use thiserror::Error;

/// Message returned to clients when no renderer can serve the requested type.
pub const NO_HANDLER_MESSAGE: &str = "No handler found for Accept header provided!";

/// Errors raised while negotiating, producing or rendering a response.
#[derive(Debug, Error)]
pub enum Error {
	/// No renderer is registered for the requested type and no default exists.
	///
	/// Carries the requested content type for logging; the client-facing message is fixed.
	#[error("No handler found for Accept header provided!")]
	UnsupportedContentType(String),

	/// The records handed to a renderer are empty or not uniform.
	#[error("Malformed record set: {0}")]
	MalformedRecordSet(String),

	/// A renderer failed to serialize the records.
	#[error("Renderer error: {0}")]
	Renderer(String),

	/// The data source behind a route failed to produce records.
	#[error("Data source error: {0}")]
	DataSource(String),

	/// No route matches the request path.
	#[error("Not found: {0}")]
	NotFound(String),

	/// The route exists but does not accept the request method.
	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),

	/// The request could not be interpreted.
	#[error("HTTP error: {0}")]
	Http(String),

	/// Settings could not be loaded or are invalid.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// Internal error
	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// Returns the HTTP status code this error maps to.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_core::exception::Error;
	///
	/// assert_eq!(Error::UnsupportedContentType("application/xml".into()).status_code(), 406);
	/// assert_eq!(Error::MalformedRecordSet("empty".into()).status_code(), 500);
	/// assert_eq!(Error::NotFound("/missing".into()).status_code(), 404);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::UnsupportedContentType(_) => 406,
			Error::NotFound(_) => 404,
			Error::MethodNotAllowed(_) => 405,
			Error::Http(_) => 400,
			Error::MalformedRecordSet(_)
			| Error::Renderer(_)
			| Error::DataSource(_)
			| Error::Configuration(_)
			| Error::Internal(_) => 500,
		}
	}

	/// Returns true for errors caused by the client request.
	pub fn is_client_error(&self) -> bool {
		(400..500).contains(&self.status_code())
	}
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
