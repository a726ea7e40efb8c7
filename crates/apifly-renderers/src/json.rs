use apifly_core::exception::Error;
use apifly_core::record::{Record, RecordSet};
use bytes::Bytes;
use serde::Serialize;

use crate::renderer::{RenderResult, Renderer};

/// Top-level object wrapping rendered records.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
	data: &'a [Record],
}

/// JSON renderer
///
/// Renders records inside a `{"data": [...]}` envelope, keeping field order.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
	/// Pretty-print the output
	pub pretty: bool,
}

impl JsonRenderer {
	/// Creates a compact JSON renderer
	///
	/// # Examples
	///
	/// ```
	/// use apifly_core::RecordSet;
	/// use apifly_renderers::{JsonRenderer, Renderer};
	/// use serde_json::json;
	///
	/// let records = RecordSet::from_value(json!([{"a": 1}])).unwrap();
	/// let body = JsonRenderer::new().render(&records).unwrap();
	/// assert_eq!(body, r#"{"data":[{"a":1}]}"#);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a renderer producing indented output
	pub fn pretty() -> Self {
		Self { pretty: true }
	}
}

impl Renderer for JsonRenderer {
	fn media_type(&self) -> &str {
		"application/json"
	}

	fn format(&self) -> &str {
		"json"
	}

	fn render(&self, records: &RecordSet) -> RenderResult<Bytes> {
		let envelope = Envelope {
			data: records.records(),
		};
		let json = if self.pretty {
			serde_json::to_vec_pretty(&envelope)
		} else {
			serde_json::to_vec(&envelope)
		}
		.map_err(|e| Error::Renderer(e.to_string()))?;

		Ok(Bytes::from(json))
	}
}
