//! Tests for HTTP request handlers.

#[cfg(test)]
mod tests {
    use crate::client::{HttpMethod, QueryParams, RequestOptions, WooApi};
    use crate::config::Config;
    use crate::error::{Result, WooError};
    use crate::server::create_router;
    use crate::server::handlers::fetch_products;
    use crate::server::state::AppState;
    use crate::testing::spawn_fake_store;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    fn config_for(base_url: Option<&str>) -> Config {
        let base_url = base_url.map(str::to_string);
        let mut config = Config::default();
        config.apply_overrides(move |name| match name {
            "WOO_URL" => base_url.clone(),
            "WOO_CONSUMER_KEY" => Some("ck_route".to_string()),
            "WOO_CONSUMER_SECRET" => Some("cs_route".to_string()),
            _ => None,
        });
        config
    }

    fn router_for(config: &Config) -> Router {
        create_router(Arc::new(AppState::new(config).unwrap()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Answers every call with a canned result and records the calls.
    struct StubApi {
        result: Mutex<Option<Result<Option<Value>>>>,
        calls: Mutex<Vec<(HttpMethod, String, Option<QueryParams>)>>,
    }

    impl StubApi {
        fn new(result: Result<Option<Value>>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WooApi for StubApi {
        async fn request(
            &self,
            method: HttpMethod,
            endpoint: &str,
            options: RequestOptions,
        ) -> Result<Option<Value>> {
            self.calls
                .lock()
                .unwrap()
                .push((method, endpoint.to_string(), options.params));
            self.result.lock().unwrap().take().unwrap_or(Ok(None))
        }
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        let app = router_for(&Config::default());

        let request = Request::builder()
            .uri("/woo-api")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Hello from woo-edge!");
    }

    #[tokio::test]
    async fn test_index_trailing_slash_not_routed() {
        let app = router_for(&Config::default());

        let request = Request::builder()
            .uri("/woo-api/")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_products_relays_store_json() {
        let store = spawn_fake_store().await;
        let app = router_for(&config_for(Some(&store.base_url)));

        let (status, body) = get_json(app, "/woo-api/products").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "name": "Mug"}, {"id": 2, "name": "Hat"}]));

        let recorded = store.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].path, "/wp-json/wc/v3/products");
        assert_eq!(recorded[0].query.as_deref(), Some("per_page=5"));
        // base64("ck_route:cs_route")
        assert_eq!(
            recorded[0].authorization.as_deref(),
            Some("Basic Y2tfcm91dGU6Y3Nfcm91dGU=")
        );
    }

    #[tokio::test]
    async fn test_products_without_bindings() {
        let app = router_for(&config_for(None));

        let (status, body) = get_json(app, "/woo-api/products").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "W001");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_products_store_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = router_for(&config_for(Some(&format!("http://{}", addr))));
        let (status, body) = get_json(app, "/woo-api/products").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "W002");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = router_for(&Config::default());

        let request = Request::builder()
            .uri("/woo-api/orders")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_products_is_read_only() {
        let app = router_for(&Config::default());

        let request = Request::builder()
            .method("POST")
            .uri("/woo-api/products")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_fetch_products_requests_first_page() {
        let api = StubApi::new(Ok(Some(json!([{"id": 9}]))));

        let products = fetch_products(&api, 5).await.unwrap();
        assert_eq!(products, json!([{"id": 9}]));

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, HttpMethod::Get);
        assert_eq!(calls[0].1, "products");
        assert_eq!(
            calls[0].2,
            Some(QueryParams::new().with("per_page", 5u32))
        );
    }

    #[tokio::test]
    async fn test_fetch_products_no_content_is_null() {
        let api = StubApi::new(Ok(None));
        assert_eq!(fetch_products(&api, 5).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_fetch_products_propagates_upstream_error() {
        let api = StubApi::new(Err(WooError::Upstream {
            status: 401,
            status_text: "Unauthorized".to_string(),
            body: "{}".to_string(),
        }));

        let err = fetch_products(&api, 5).await.unwrap_err();
        assert_eq!(err.upstream_status(), Some(401));
    }
}
