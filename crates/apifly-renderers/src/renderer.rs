//! Renderer trait

use apifly_core::exception::Result;
use apifly_core::record::RecordSet;
use bytes::Bytes;
use serde_json::Value;

/// Result type returned by renderers
pub type RenderResult<T> = Result<T>;

/// Transforms a record set into a response body for one content type.
///
/// Renderers are stateless after construction and are shared between requests,
/// so rendering the same records twice must produce identical bytes.
pub trait Renderer: Send + Sync + std::fmt::Debug {
	/// Value sent as the response `Content-Type`.
	fn media_type(&self) -> &str;

	/// Short alias for the format, e.g. `csv`.
	fn format(&self) -> &str;

	/// Renders `records`.
	///
	/// # Errors
	///
	/// Returns [`Error::Renderer`](apifly_core::Error::Renderer) if a value cannot be
	/// represented in this format.
	fn render(&self, records: &RecordSet) -> RenderResult<Bytes>;
}

/// Plain display form of a value: strings are written raw, everything else in its
/// JSON form.
pub(crate) fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		_ => value.to_string(),
	}
}
