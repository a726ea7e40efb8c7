use apifly_core::exception::Error;
use apifly_core::record::RecordSet;
use bytes::Bytes;
use std::fmt::Write;

use crate::renderer::{RenderResult, Renderer, display_value};

/// HTML table renderer
///
/// Emits a minimal document with one header cell per field and one row per record.
/// Values are inserted in their plain display form and are not HTML-escaped.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
	/// Heading shown above the table
	pub title: String,
}

impl Default for HtmlRenderer {
	fn default() -> Self {
		Self {
			title: "Your data:".to_string(),
		}
	}
}

impl HtmlRenderer {
	/// Creates a new HTML renderer
	///
	/// # Examples
	///
	/// ```
	/// use apifly_renderers::HtmlRenderer;
	///
	/// let renderer = HtmlRenderer::new();
	/// assert_eq!(renderer.title, "Your data:");
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the heading text
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	fn write_document(&self, records: &RecordSet, html: &mut String) -> std::fmt::Result {
		write!(html, "<html><body><h1>{}</h1><table><tr>", self.title)?;
		for field in records.fields() {
			write!(html, "<th>{}</th>", field)?;
		}
		html.push_str("</tr>");

		for record in records {
			html.push_str("<tr>");
			for value in record.values() {
				write!(html, "<td>{}</td>", display_value(value))?;
			}
			html.push_str("</tr>");
		}

		html.push_str("</table></body></html>");
		Ok(())
	}
}

impl Renderer for HtmlRenderer {
	fn media_type(&self) -> &str {
		"text/html; charset=utf-8"
	}

	fn format(&self) -> &str {
		"html"
	}

	fn render(&self, records: &RecordSet) -> RenderResult<Bytes> {
		let mut html = String::new();
		self.write_document(records, &mut html)
			.map_err(|e| Error::Renderer(e.to_string()))?;
		Ok(Bytes::from(html))
	}
}
