//! # Apifly Renderers
//!
//! Renderers turn a validated [`RecordSet`](apifly_core::RecordSet) into a response
//! body for one content type.
//!
//! | Renderer | Media type | Format alias |
//! |---|---|---|
//! | [`CsvRenderer`] | `text/csv; charset=utf-8` | `csv` |
//! | [`JsonRenderer`] | `application/json` | `json` |
//! | [`HtmlRenderer`] | `text/html; charset=utf-8` | `html` |
//!
//! ```rust
//! use apifly_core::RecordSet;
//! use apifly_renderers::{CsvRenderer, Renderer};
//! use serde_json::json;
//!
//! let records = RecordSet::from_value(json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}])).unwrap();
//! let body = CsvRenderer::new().render(&records).unwrap();
//! assert_eq!(body, "a (N),b (N)\n1,2\n3,4");
//! ```

pub mod csv_renderer;
pub mod html;
pub mod json;
pub mod renderer;

pub use csv_renderer::CsvRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use renderer::{RenderResult, Renderer};
