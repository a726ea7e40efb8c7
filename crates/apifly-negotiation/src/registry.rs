//! Renderer registry
//!
//! Maps requested content types to renderers. The registry is filled during
//! start-up through `&mut self` and then shared read-only behind an `Arc`, so
//! lookups from concurrent requests need no locking.

use apifly_renderers::{CsvRenderer, HtmlRenderer, JsonRenderer, Renderer};
use std::collections::HashMap;
use std::sync::Arc;

use crate::accept::RequestedType;

/// Short names accepted at registration time and the MIME types they stand for.
pub const ALIASES: &[(&str, &str)] = &[
	("json", "application/json"),
	("csv", "text/csv"),
	("html", "text/html"),
];

/// Returns the canonical MIME type for a short alias.
///
/// # Examples
///
/// ```
/// use apifly_negotiation::registry::canonical_media_type;
///
/// assert_eq!(canonical_media_type("csv"), Some("text/csv"));
/// assert_eq!(canonical_media_type("text/csv"), None);
/// ```
pub fn canonical_media_type(alias: &str) -> Option<&'static str> {
	ALIASES
		.iter()
		.find(|(short, _)| *short == alias)
		.map(|(_, canonical)| *canonical)
}

/// Registry of renderers keyed by requested content type.
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
	renderers: HashMap<RequestedType, Arc<dyn Renderer>>,
}

impl RendererRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry used by the demo application: `csv`, `json` and `html`, with `html`
	/// as the default.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_negotiation::{RendererRegistry, RequestedType};
	///
	/// let registry = RendererRegistry::with_builtin_renderers();
	/// let fallback = registry.lookup(&RequestedType::Absent).unwrap();
	/// assert_eq!(fallback.format(), "html");
	/// ```
	pub fn with_builtin_renderers() -> Self {
		let mut registry = Self::new();
		registry.register("csv", Arc::new(CsvRenderer::new()), false);
		registry.register("json", Arc::new(JsonRenderer::new()), false);
		registry.register_default("html", Arc::new(HtmlRenderer::new()));
		registry
	}

	/// Registers `renderer` under `content_type`.
	///
	/// A known alias (`json`, `csv`, `html`) is registered under its canonical MIME
	/// type as well. With `is_default`, the renderer also becomes the fallback for
	/// `*/*` and for requests without an `Accept` header, replacing any previous
	/// default. The identifier is stored as an opaque key without validation.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_negotiation::{RendererRegistry, RequestedType};
	/// use apifly_renderers::JsonRenderer;
	/// use std::sync::Arc;
	///
	/// let mut registry = RendererRegistry::new();
	/// registry.register("json", Arc::new(JsonRenderer::new()), true);
	///
	/// assert!(registry.contains(&RequestedType::from("json")));
	/// assert!(registry.contains(&RequestedType::from("application/json")));
	/// assert!(registry.contains(&RequestedType::Wildcard));
	/// assert!(registry.contains(&RequestedType::Absent));
	/// ```
	pub fn register(&mut self, content_type: &str, renderer: Arc<dyn Renderer>, is_default: bool) {
		tracing::debug!(
			content_type,
			format = renderer.format(),
			is_default,
			"registering renderer"
		);

		self.renderers.insert(
			RequestedType::from_identifier(content_type),
			Arc::clone(&renderer),
		);

		if let Some(canonical) = canonical_media_type(content_type) {
			self.renderers.insert(
				RequestedType::from_identifier(canonical),
				Arc::clone(&renderer),
			);
		}

		if is_default {
			if let Some(previous) = self.default_renderer() {
				tracing::debug!(previous = previous.format(), "replacing default renderer");
			}
			self.renderers
				.insert(RequestedType::Wildcard, Arc::clone(&renderer));
			self.renderers.insert(RequestedType::Absent, renderer);
		}
	}

	/// Registers `renderer` under `content_type` and makes it the default.
	pub fn register_default(&mut self, content_type: &str, renderer: Arc<dyn Renderer>) {
		self.register(content_type, renderer, true);
	}

	/// Finds the renderer for `requested`: the exact entry if present, otherwise the
	/// `*/*` entry. Returns `None` when neither exists.
	pub fn lookup(&self, requested: &RequestedType) -> Option<Arc<dyn Renderer>> {
		self.renderers
			.get(requested)
			.or_else(|| self.renderers.get(&RequestedType::Wildcard))
			.cloned()
	}

	/// The renderer registered for `*/*`, if any.
	pub fn default_renderer(&self) -> Option<Arc<dyn Renderer>> {
		self.renderers.get(&RequestedType::Wildcard).cloned()
	}

	/// Returns true if `requested` has its own entry (no fallback applied).
	pub fn contains(&self, requested: &RequestedType) -> bool {
		self.renderers.contains_key(requested)
	}

	/// Sorted list of identifiers with their own entry, excluding the absent-header key.
	pub fn content_types(&self) -> Vec<String> {
		let mut types: Vec<String> = self
			.renderers
			.keys()
			.filter_map(|key| key.as_str().map(str::to_string))
			.collect();
		types.sort();
		types
	}

	/// Number of keys, counting aliases and fallback keys separately.
	pub fn len(&self) -> usize {
		self.renderers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.renderers.is_empty()
	}
}
