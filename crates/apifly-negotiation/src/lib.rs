//! # Apifly Negotiation
//!
//! Content negotiation on the `Accept` request header.
//!
//! - [`RendererRegistry`] maps content-type identifiers to renderers, including
//!   short aliases (`csv` → `text/csv`) and one default renderer for `*/*` and for
//!   requests without an `Accept` header.
//! - [`Dispatcher`] wraps a data source into a [`NegotiatingHandler`] that reads the
//!   first `Accept` entry, resolves a renderer (exact → default → 406), fetches the
//!   records and renders them.
//!
//! ## Example
//!
//! ```rust
//! use apifly_negotiation::{Dispatcher, RendererRegistry, RequestedType};
//! use apifly_core::Record;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(RendererRegistry::with_builtin_renderers());
//! let handler = Dispatcher::new(registry).wrap(Vec::<Record>::new);
//!
//! let csv = handler.resolve(&RequestedType::from_accept("text/csv")).unwrap();
//! assert_eq!(csv.format(), "csv");
//!
//! // only the first preference counts
//! let fallback = handler.resolve(&RequestedType::from_accept("application/xml, text/csv")).unwrap();
//! assert_eq!(fallback.format(), "html");
//! ```

pub mod accept;
pub mod dispatcher;
pub mod registry;

pub use accept::RequestedType;
pub use dispatcher::{DataSource, Dispatcher, NegotiatingHandler};
pub use registry::{ALIASES, RendererRegistry, canonical_media_type};
