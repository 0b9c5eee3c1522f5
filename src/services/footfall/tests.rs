//! Tests for this service, driven through the HTTP surface against an
//! in-memory store double.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use super::{DataStore, FootfallRecord, FootfallService, StoreConnection};
use crate::services::auth::ApiKeySecret;

/// The secret configured for every test router.
const API_KEY: &str = "secret123";

/// Shared state behind a [`MockStore`] and its connections.
#[derive(Default)]
struct MockState
{
	/// The "table".
	rows: Mutex<Vec<FootfallRecord>>,

	/// Fail every [`DataStore::acquire`] call.
	fail_connect: bool,

	/// Fail every query once a connection has been handed out.
	fail_queries: bool,

	/// How many connections have been handed out.
	opened: AtomicUsize,

	/// How many connections have been closed.
	closed: AtomicUsize,

	/// How many inserts have been executed.
	inserts: AtomicUsize,
}

/// An in-memory [`DataStore`] double.
#[derive(Default)]
struct MockStore
{
	/// Shared with every connection this store hands out.
	state: Arc<MockState>,
}

impl MockStore
{
	fn with_rows(rows: Vec<FootfallRecord>) -> Self
	{
		Self {
			state: Arc::new(MockState { rows: Mutex::new(rows), ..Default::default() }),
		}
	}

	fn failing_connects() -> Self
	{
		Self {
			state: Arc::new(MockState { fail_connect: true, ..Default::default() }),
		}
	}

	fn failing_queries() -> Self
	{
		Self {
			state: Arc::new(MockState { fail_queries: true, ..Default::default() }),
		}
	}
}

#[async_trait]
impl DataStore for MockStore
{
	async fn acquire(&self) -> Result<Box<dyn StoreConnection>, sqlx::Error>
	{
		if self.state.fail_connect {
			return Err(sqlx::Error::Configuration("simulated connect failure".into()));
		}

		self.state.opened.fetch_add(1, Ordering::SeqCst);

		Ok(Box::new(MockConnection { state: Arc::clone(&self.state) }))
	}
}

/// A connection handed out by a [`MockStore`].
struct MockConnection
{
	/// Shared with the store that handed this connection out.
	state: Arc<MockState>,
}

#[async_trait]
impl StoreConnection for MockConnection
{
	async fn fetch_footfall(&mut self, limit: u64) -> Result<Vec<FootfallRecord>, sqlx::Error>
	{
		if self.state.fail_queries {
			return Err(sqlx::Error::Protocol(String::from("simulated query failure")));
		}

		let rows = self.state.rows.lock().unwrap();

		Ok(rows.iter().take(limit as usize).cloned().collect())
	}

	async fn insert_footfall(&mut self, record: &FootfallRecord) -> Result<(), sqlx::Error>
	{
		if self.state.fail_queries {
			return Err(sqlx::Error::Protocol(String::from("simulated query failure")));
		}

		self.state.rows.lock().unwrap().push(record.clone());
		self.state.inserts.fetch_add(1, Ordering::SeqCst);

		Ok(())
	}

	async fn close(self: Box<Self>)
	{
		self.state.closed.fetch_add(1, Ordering::SeqCst);
	}
}

/// Build a router around `store`, nested the same way the real server nests
/// it.
fn router(store: &MockStore) -> Router
{
	let svc = FootfallService::new(
		Arc::new(MockStore { state: Arc::clone(&store.state) }),
		ApiKeySecret::new(Some(String::from(API_KEY))),
	);

	Router::new().nest("/footfall", svc.into())
}

fn record(state: &str, district: &str) -> FootfallRecord
{
	FootfallRecord { state: state.parse().unwrap(), district: district.parse().unwrap() }
}

fn get(uri: &str) -> Request<Body>
{
	Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, api_key: Option<&str>, body: &serde_json::Value) -> Request<Body>
{
	let mut builder = Request::builder()
		.method(Method::POST)
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json");

	if let Some(api_key) = api_key {
		builder = builder.header("x-api-key", api_key);
	}

	builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value
{
	let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

	serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn submit_then_fetch_returns_the_record()
{
	let store = MockStore::default();
	let router = router(&store);
	let payload = json!({"state": "Karnataka", "district": "Bengaluru"});

	let response = router
		.clone()
		.oneshot(post("/footfall/", Some(API_KEY), &payload))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, payload);

	let response = router.oneshot(get("/footfall/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, json!([payload]));
}

#[tokio::test]
async fn submit_with_wrong_key_is_rejected()
{
	let store = MockStore::default();
	let router = router(&store);
	let payload = json!({"state": "Karnataka", "district": "Bengaluru"});

	let response = router.oneshot(post("/footfall/", Some("wrong"), &payload)).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(body_json(response).await, json!({"message": "invalid API key"}));
	assert_eq!(store.state.inserts.load(Ordering::SeqCst), 0);
	assert_eq!(store.state.opened.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn submit_without_key_is_rejected()
{
	let store = MockStore::default();
	let router = router(&store);
	let payload = json!({"state": "Karnataka", "district": "Bengaluru"});

	let response = router.oneshot(post("/footfall/", None, &payload)).await.unwrap();

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(store.state.inserts.load(Ordering::SeqCst), 0);
	assert_eq!(store.state.opened.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn submit_with_malformed_payload_is_rejected()
{
	let store = MockStore::default();
	let router = router(&store);

	for payload in [
		json!({"state": "", "district": "Bengaluru"}),
		json!({"state": "Karnataka", "district": "a".repeat(101)}),
		json!({"state": "Karnataka"}),
	] {
		let response = router
			.clone()
			.oneshot(post("/footfall/", Some(API_KEY), &payload))
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "payload: {payload}");
	}

	assert_eq!(store.state.inserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_returns_at_most_ten_records()
{
	let rows = (0..25)
		.map(|n| record(&format!("State {n}"), &format!("District {n}")))
		.collect();

	let store = MockStore::with_rows(rows);
	let router = router(&store);

	let response = router.oneshot(get("/footfall/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let records = body_json(response).await;

	assert_eq!(records.as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn fetch_with_unreachable_database_fails()
{
	let store = MockStore::failing_connects();
	let router = router(&store);

	let response = router.oneshot(get("/footfall/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body_json(response).await, json!({"message": "database connection failed"}));
}

#[tokio::test]
async fn failed_queries_forward_the_error_text()
{
	let store = MockStore::failing_queries();
	let router = router(&store);

	let response = router.oneshot(get("/footfall/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = body_json(response).await;
	let message = body["message"].as_str().unwrap();

	assert!(message.starts_with("database error:"), "unexpected message: {message}");
	assert!(message.contains("simulated query failure"), "unexpected message: {message}");
}

#[tokio::test]
async fn connections_are_closed_after_failed_queries()
{
	let store = MockStore::failing_queries();
	let router = router(&store);
	let payload = json!({"state": "Karnataka", "district": "Bengaluru"});

	let response = router.clone().oneshot(get("/footfall/")).await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let response = router.oneshot(post("/footfall/", Some(API_KEY), &payload)).await.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(store.state.opened.load(Ordering::SeqCst), 2);
	assert_eq!(store.state.closed.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn connections_are_closed_after_successful_queries()
{
	let store = MockStore::default();
	let router = router(&store);
	let payload = json!({"state": "Karnataka", "district": "Bengaluru"});

	router.clone().oneshot(get("/footfall/")).await.unwrap();
	router.oneshot(post("/footfall/", Some(API_KEY), &payload)).await.unwrap();

	assert_eq!(store.state.opened.load(Ordering::SeqCst), 2);
	assert_eq!(store.state.closed.load(Ordering::SeqCst), 2);
}
