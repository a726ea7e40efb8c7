//! Record data model.
//!
//! A [`Record`] is an ordered mapping of field name to value. A [`RecordSet`] is a
//! non-empty sequence of records that all share the field names of the first record,
//! in the same order. Renderers only ever see a validated [`RecordSet`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::exception::{Error, Result};

/// A single record. Field order is insertion order.
pub type Record = Map<String, Value>;

/// A validated, uniform sequence of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
	records: Vec<Record>,
}

impl RecordSet {
	/// Validates `records` and wraps them.
	///
	/// # Errors
	///
	/// Returns [`Error::MalformedRecordSet`] when `records` is empty, when the first
	/// record has no fields, or when any record does not have exactly the first
	/// record's field names in the same order.
	///
	/// # Examples
	///
	/// ```
	/// use apifly_core::record::{Record, RecordSet};
	/// use serde_json::json;
	///
	/// let mut first = Record::new();
	/// first.insert("a".into(), json!(1));
	/// let mut second = Record::new();
	/// second.insert("b".into(), json!(2));
	///
	/// assert!(RecordSet::new(vec![first.clone()]).is_ok());
	/// assert!(RecordSet::new(vec![first, second]).is_err());
	/// assert!(RecordSet::new(Vec::new()).is_err());
	/// ```
	pub fn new(records: Vec<Record>) -> Result<Self> {
		let Some(first) = records.first() else {
			return Err(Error::MalformedRecordSet("record set is empty".to_string()));
		};
		if first.is_empty() {
			return Err(Error::MalformedRecordSet("records have no fields".to_string()));
		}

		for (index, record) in records.iter().enumerate().skip(1) {
			if !record.keys().eq(first.keys()) {
				return Err(Error::MalformedRecordSet(format!(
					"record {} has fields [{}], expected [{}]",
					index,
					join_keys(record),
					join_keys(first),
				)));
			}
		}

		Ok(Self { records })
	}

	/// Builds a record set from a JSON array of objects.
	///
	/// # Errors
	///
	/// Returns [`Error::MalformedRecordSet`] if `value` is not an array of objects or
	/// fails [`RecordSet::new`] validation.
	pub fn from_value(value: Value) -> Result<Self> {
		let Value::Array(items) = value else {
			return Err(Error::MalformedRecordSet(
				"expected an array of records".to_string(),
			));
		};

		let records = items
			.into_iter()
			.enumerate()
			.map(|(index, item)| match item {
				Value::Object(record) => Ok(record),
				other => Err(Error::MalformedRecordSet(format!(
					"record {} is not an object: {}",
					index, other
				))),
			})
			.collect::<Result<Vec<_>>>()?;

		Self::new(records)
	}

	/// The first record, which defines the field names and their order.
	pub fn first(&self) -> &Record {
		// `new` rejects empty input
		&self.records[0]
	}

	/// Field names shared by every record.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.first().keys().map(String::as_str)
	}

	/// Number of fields per record.
	pub fn field_count(&self) -> usize {
		self.first().len()
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Record> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Never true for a validated set.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<'a> IntoIterator for &'a RecordSet {
	type Item = &'a Record;
	type IntoIter = std::slice::Iter<'a, Record>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

fn join_keys(record: &Record) -> String {
	record.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_uniform_records_are_accepted() {
		let records = RecordSet::from_value(json!([
			{"a": 1, "b": 2},
			{"a": 3, "b": 4},
			{"a": 5, "b": 6}
		]))
		.unwrap();

		assert_eq!(records.len(), 3);
		assert_eq!(records.field_count(), 2);
		assert_eq!(records.fields().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_field_order_is_preserved() {
		let records = RecordSet::from_value(json!([{"zeta": 1, "alpha": 2}])).unwrap();
		assert_eq!(records.fields().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
	}

	#[rstest]
	#[case::empty(json!([]))]
	#[case::missing_field(json!([{"a": 1, "b": 2}, {"a": 3}]))]
	#[case::extra_field(json!([{"a": 1}, {"a": 3, "b": 4}]))]
	#[case::reordered(json!([{"a": 1, "b": 2}, {"b": 4, "a": 3}]))]
	#[case::renamed(json!([{"a": 1}, {"c": 1}]))]
	#[case::not_object(json!([{"a": 1}, 5]))]
	#[case::not_array(json!({"a": 1}))]
	#[case::no_fields(json!([{}, {}]))]
	fn test_malformed_records_are_rejected(#[case] value: Value) {
		let err = RecordSet::from_value(value).unwrap_err();
		assert!(matches!(err, Error::MalformedRecordSet(_)));
		assert_eq!(err.status_code(), 500);
	}

	#[rstest]
	fn test_fieldless_records_are_rejected() {
		let err = RecordSet::new(vec![Record::new(), Record::new()]).unwrap_err();
		assert_eq!(err.to_string(), "Malformed record set: records have no fields");
	}

	#[rstest]
	fn test_error_names_offending_record() {
		let err = RecordSet::from_value(json!([{"a": 1, "b": 2}, {"a": 3}])).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Malformed record set: record 1 has fields [a], expected [a, b]"
		);
	}

	#[rstest]
	fn test_serializes_as_plain_array() {
		let records = RecordSet::from_value(json!([{"a": 1}])).unwrap();
		assert_eq!(serde_json::to_value(&records).unwrap(), json!([{"a": 1}]));
	}
}
