use apifly_core::exception::Error;
use apifly_core::record::RecordSet;
use bytes::Bytes;
use serde_json::Value;

use crate::renderer::{RenderResult, Renderer, display_value};

/// CSV renderer for record sets
///
/// The header row is derived from the first record: every field name is annotated
/// with a one-letter type tag taken from the first record's value (`N` numeric,
/// `S` string, `M` nested mapping). Values are written in their plain display form
/// without quoting, so embedded delimiters or quotes are emitted as-is.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
	/// CSV delimiter (default: ',')
	pub delimiter: u8,
	/// Include the tagged header row in output
	pub headers: bool,
}

impl Default for CsvRenderer {
	fn default() -> Self {
		Self {
			delimiter: b',',
			headers: true,
		}
	}
}

impl CsvRenderer {
	/// Creates a new CSV renderer
	///
	/// # Examples
	///
	/// ```
	/// use apifly_renderers::CsvRenderer;
	///
	/// let renderer = CsvRenderer::new();
	/// assert_eq!(renderer.delimiter, b',');
	/// assert!(renderer.headers);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the delimiter character
	///
	/// # Examples
	///
	/// ```
	/// use apifly_renderers::CsvRenderer;
	///
	/// let renderer = CsvRenderer::new().delimiter(b';');
	/// assert_eq!(renderer.delimiter, b';');
	/// ```
	pub fn delimiter(mut self, delimiter: u8) -> Self {
		self.delimiter = delimiter;
		self
	}

	/// Sets whether to include the header row
	pub fn headers(mut self, headers: bool) -> Self {
		self.headers = headers;
		self
	}
}

/// One-letter type tag for a header cell, if the value kind has one.
///
/// # Examples
///
/// ```
/// use apifly_renderers::csv_renderer::type_tag;
/// use serde_json::json;
///
/// assert_eq!(type_tag(&json!(1)), Some('N'));
/// assert_eq!(type_tag(&json!("x")), Some('S'));
/// assert_eq!(type_tag(&json!({"k": 1})), Some('M'));
/// assert_eq!(type_tag(&json!(null)), None);
/// ```
pub fn type_tag(value: &Value) -> Option<char> {
	match value {
		Value::Number(_) => Some('N'),
		Value::String(_) => Some('S'),
		Value::Object(_) => Some('M'),
		Value::Null | Value::Bool(_) | Value::Array(_) => None,
	}
}

fn header_cells(records: &RecordSet) -> RenderResult<Vec<String>> {
	records
		.first()
		.iter()
		.map(|(name, value)| {
			type_tag(value)
				.map(|tag| format!("{} ({})", name, tag))
				.ok_or_else(|| {
					Error::Renderer(format!(
						"CSV renderer cannot tag field {:?} holding {}",
						name, value
					))
				})
		})
		.collect()
}

fn write_row(wtr: &mut csv::Writer<Vec<u8>>, cells: &[String]) -> RenderResult<()> {
	// csv quotes a row made of one empty field; it must come out as an empty line.
	if let [cell] = cells
		&& cell.is_empty()
	{
		wtr.flush().map_err(|e| Error::Renderer(e.to_string()))?;
		wtr.get_mut().push(b'\n');
		return Ok(());
	}

	wtr.write_record(cells)
		.map_err(|e| Error::Renderer(e.to_string()))
}

impl Renderer for CsvRenderer {
	fn media_type(&self) -> &str {
		"text/csv; charset=utf-8"
	}

	fn format(&self) -> &str {
		"csv"
	}

	fn render(&self, records: &RecordSet) -> RenderResult<Bytes> {
		let mut wtr = csv::WriterBuilder::new()
			.delimiter(self.delimiter)
			.has_headers(false)
			.quote_style(csv::QuoteStyle::Never)
			.terminator(csv::Terminator::Any(b'\n'))
			.from_writer(vec![]);

		if self.headers {
			write_row(&mut wtr, &header_cells(records)?)?;
		}

		for record in records {
			let cells: Vec<String> = record.values().map(display_value).collect();
			write_row(&mut wtr, &cells)?;
		}

		let mut data = wtr
			.into_inner()
			.map_err(|e| Error::Renderer(e.to_string()))?;
		// Lines are separated, not terminated.
		if data.last() == Some(&b'\n') {
			data.pop();
		}
		Ok(Bytes::from(data))
	}
}
