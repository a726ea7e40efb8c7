//! Output properties of the built-in renderers on the demo dataset.

use apifly::prelude::*;
use apifly::server::sample_records;
use apifly_integration_tests::TestServerGuard;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn sample() -> RecordSet {
	RecordSet::new(sample_records()).unwrap()
}

#[rstest]
fn test_json_round_trip_yields_records(sample: RecordSet) {
	let body = JsonRenderer::new().render(&sample).unwrap();

	let parsed: Value = serde_json::from_slice(&body).unwrap();
	let records: Vec<Record> = serde_json::from_value(parsed["data"].clone()).unwrap();

	assert_eq!(records, sample_records());
}

#[rstest]
fn test_csv_lines(sample: RecordSet) {
	let body = CsvRenderer::new().render(&sample).unwrap();
	let text = std::str::from_utf8(&body).unwrap();

	assert_eq!(text.lines().collect::<Vec<_>>(), ["a (N),b (N)", "1,2", "3,4", "5,6"]);
}

#[rstest]
fn test_html_table_shape(sample: RecordSet) {
	let body = HtmlRenderer::new().render(&sample).unwrap();
	let html = std::str::from_utf8(&body).unwrap();

	let rows: Vec<&str> = html.split("<tr>").skip(1).collect();
	assert_eq!(rows.len(), 4);
	assert_eq!(rows[0].matches("<th>").count(), 2);
	for row in &rows[1..] {
		assert_eq!(row.matches("<td>").count(), 2);
	}
}

#[rstest]
#[tokio::test]
async fn test_served_json_matches_direct_rendering(sample: RecordSet) {
	let server = TestServerGuard::spawn_demo().await;

	let served = server.get("/", Some("application/json")).await.bytes().await.unwrap();
	let direct = JsonRenderer::new().render(&sample).unwrap();

	assert_eq!(served, direct);
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_head_request_has_headers_but_no_body() {
	let server = TestServerGuard::spawn_demo().await;

	let response = reqwest::Client::new()
		.head(format!("{}/", server.url))
		.header(reqwest::header::ACCEPT, "text/csv")
		.send()
		.await
		.unwrap();

	assert_eq!(response.status(), 200);
	assert_eq!(response.headers()["content-type"], "text/csv; charset=utf-8");
	assert!(response.bytes().await.unwrap().is_empty());
	server.shutdown().await;
}
