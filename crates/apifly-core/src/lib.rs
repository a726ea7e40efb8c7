//! # Apifly Core
//!
//! Shared building blocks for the Apifly workspace:
//!
//! - [`exception`]: the error type every crate returns, with its HTTP status mapping
//! - [`record`]: the record / record-set data model handed to renderers
//!
//! ## Example
//!
//! ```rust
//! use apifly_core::record::RecordSet;
//! use serde_json::json;
//!
//! let records = RecordSet::from_value(json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}])).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records.fields().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

pub mod exception;
pub mod record;

pub use exception::{Error, Result};
pub use record::{Record, RecordSet};
