//! In-process fake WooCommerce store for tests.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A request as the fake store saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Handle to a running fake store.
#[derive(Clone)]
pub struct FakeStore {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStore {
    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn record(log: &Log, method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) -> Recorded {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: String::from_utf8_lossy(body).into_owned(),
    };
    log.lock().unwrap().push(recorded.clone());
    recorded
}

async fn echo(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let r = record(&log, &method, &uri, &headers, &body);
    Json(json!({
        "method": r.method,
        "path": r.path,
        "query": r.query,
        "authorization": r.authorization,
        "content_type": r.content_type,
        "body": r.body,
    }))
}

async fn products(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    record(&log, &method, &uri, &headers, &body);
    Json(json!([
        {"id": 1, "name": "Mug"},
        {"id": 2, "name": "Hat"}
    ]))
}

async fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn broken() -> impl IntoResponse {
    (StatusCode::OK, "<html>not json</html>")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(10)).await;
    Json(json!({"late": true}))
}

/// Starts a fake store on an ephemeral local port.
///
/// Routes live under `/wp-json/wc/v3/`: `echo` (any method, reflects the
/// request), `products`, `empty` (204), `missing` (404 "Not Found"),
/// `broken` (200 with a non-JSON body) and `slow` (answers after 10s).
pub async fn spawn_fake_store() -> FakeStore {
    let recorded: Log = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route("/wp-json/wc/v3/echo", any(echo))
        .route("/wp-json/wc/v3/echo/*rest", any(echo))
        .route("/wp-json/wc/v3/products", get(products))
        .route("/wp-json/wc/v3/empty", any(no_content))
        .route("/wp-json/wc/v3/missing", any(missing))
        .route("/wp-json/wc/v3/broken", any(broken))
        .route("/wp-json/wc/v3/slow", any(slow))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeStore {
        base_url: format!("http://{}", addr),
        recorded,
    }
}
