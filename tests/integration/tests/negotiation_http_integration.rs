//! Negotiation behaviour observed over a real HTTP connection.

use apifly::prelude::*;
use apifly_integration_tests::{FailingSource, TestServerGuard, record};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn people() -> Vec<Record> {
	vec![
		record([("name", json!("Ada")), ("born", json!(1815))]),
		record([("name", json!("Alan")), ("born", json!(1912))]),
	]
}

#[rstest]
#[case("csv", "text/csv; charset=utf-8")]
#[case("text/csv", "text/csv; charset=utf-8")]
#[case("json", "application/json")]
#[case("application/json", "application/json")]
#[case("html", "text/html; charset=utf-8")]
#[case("text/html", "text/html; charset=utf-8")]
#[tokio::test]
async fn test_demo_serves_every_builtin_identifier(#[case] accept: &str, #[case] content_type: &str) {
	let server = TestServerGuard::spawn_demo().await;

	let response = server.get("/", Some(accept)).await;

	assert_eq!(response.status(), 200);
	assert_eq!(response.headers()["content-type"], content_type);
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_registry_without_default_returns_406() {
	let mut registry = RendererRegistry::new();
	registry.register("csv", Arc::new(CsvRenderer::new()), false);
	let handler = Dispatcher::new(Arc::new(registry)).wrap(people);
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let response = server.get("/", Some("application/json")).await;

	assert_eq!(response.status(), 406);
	let body: serde_json::Value = response.json().await.unwrap();
	assert_eq!(body, json!({"error": "No handler found for Accept header provided!"}));
	server.shutdown().await;
}

#[rstest]
#[case(None)]
#[case(Some("*/*"))]
#[tokio::test]
async fn test_registry_without_default_rejects_fallback_requests(#[case] accept: Option<&str>) {
	let mut registry = RendererRegistry::new();
	registry.register("json", Arc::new(JsonRenderer::new()), false);
	let handler = Dispatcher::new(Arc::new(registry)).wrap(people);
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let response = server.get("/", accept).await;

	assert_eq!(response.status(), 406);
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_unexposed_type_falls_back_to_default() {
	let registry = Arc::new(RendererRegistry::with_builtin_renderers());
	let handler = Dispatcher::new(registry).wrap(people).expose_as(["json"]);
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let exposed = server.get("/", Some("json")).await;
	assert_eq!(exposed.headers()["content-type"], "application/json");

	let hidden = server.get("/", Some("text/csv")).await;
	assert_eq!(hidden.status(), 200);
	assert_eq!(hidden.headers()["content-type"], "text/html; charset=utf-8");
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_failing_source_returns_500_without_partial_body() {
	let registry = Arc::new(RendererRegistry::with_builtin_renderers());
	let handler = Dispatcher::new(registry).wrap(FailingSource);
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let response = server.get("/", Some("text/csv")).await;

	assert_eq!(response.status(), 500);
	let body: serde_json::Value = response.json().await.unwrap();
	assert_eq!(body, json!({"error": "Data source error: backend unavailable"}));
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_inconsistent_records_return_500() {
	let registry = Arc::new(RendererRegistry::with_builtin_renderers());
	let handler = Dispatcher::new(registry).wrap(|| {
		vec![
			record([("a", json!(1))]),
			record([("b", json!(2))]),
		]
	});
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let response = server.get("/", Some("json")).await;

	assert_eq!(response.status(), 500);
	let body: serde_json::Value = response.json().await.unwrap();
	assert!(body["error"].as_str().unwrap().starts_with("Malformed record set"));
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_string_fields_are_tagged_s_in_csv() {
	let registry = Arc::new(RendererRegistry::with_builtin_renderers());
	let handler = Dispatcher::new(registry).wrap(people);
	let server = TestServerGuard::spawn(Arc::new(handler)).await;

	let response = server.get("/", Some("csv")).await;

	assert_eq!(
		response.text().await.unwrap(),
		"name (S),born (N)\nAda,1815\nAlan,1912"
	);
	server.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn test_parallel_clients_get_their_own_format() {
	let server = Arc::new(TestServerGuard::spawn_demo().await);

	let tasks: Vec<_> = [
		("text/csv", "text/csv; charset=utf-8"),
		("application/json", "application/json"),
		("text/html", "text/html; charset=utf-8"),
	]
	.into_iter()
	.cycle()
	.take(24)
	.map(|(accept, expected)| {
		let server = Arc::clone(&server);
		tokio::spawn(async move {
			let response = server.get("/", Some(accept)).await;
			assert_eq!(response.status(), 200);
			assert_eq!(response.headers()["content-type"], expected);
		})
	})
	.collect();

	for task in tasks {
		task.await.unwrap();
	}
}
