use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::{http::StatusCode, response::Response, routing::get, Json, Router};
use serde_json::json;

use storefront_client::{
    refresh, CatalogLoader, ClientConfig, HttpCatalogLoader, LoadError, FETCH_FAILED_MESSAGE,
};
use storefront_products::{FilterCriteria, LoadState, ProductId, StorefrontSession};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = Router::new()
            .route(
                "/api/products",
                get(|| async {
                    Json(json!({
                        "data": [
                            { "id": 1, "name": "Red Shirt", "category": "Apparel", "price": 20 },
                            { "id": 2, "name": "Blue Mug", "category": "Kitchen", "price": "8.00" },
                            { "id": 3, "name": "Green Shirt", "category": "Apparel", "price": 25.5 }
                        ]
                    }))
                }),
            )
            .route(
                "/api/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is down") }),
            )
            .route(
                "/api/truncated",
                get(|| async {
                    let chunks = tokio_stream::iter(vec![
                        Ok::<_, std::io::Error>(Bytes::from_static(b"partial")),
                        Err(std::io::Error::other("connection reset")),
                    ]);
                    Response::builder()
                        .status(StatusCode::INTERNAL_SERVER_ERROR)
                        .body(Body::from_stream(chunks))
                        .unwrap()
                }),
            )
            .route("/api/garbage", get(|| async { "<html>not json</html>" }))
            .route(
                "/api/negative",
                get(|| async {
                    Json(json!({
                        "data": [{ "id": 1, "name": "Refund", "category": "Misc", "price": -1 }]
                    }))
                }),
            )
            .route(
                "/api/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({ "data": [] }))
                }),
            );

        // Bind to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn loader(&self, path: &str) -> HttpCatalogLoader {
        let mut config = ClientConfig::default().with_api_url(&self.base_url).unwrap();
        config.products_path = path.to_string();
        config.timeout = Duration::from_millis(500);
        HttpCatalogLoader::new(&config).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn fetches_catalog_in_response_order() {
    let server = TestServer::spawn().await;
    let loader = server.loader("/api/products");

    let products = loader.load().await.unwrap();

    let ids: Vec<ProductId> = products.iter().map(|p| p.id_typed().clone()).collect();
    assert_eq!(
        ids,
        vec![ProductId::Numeric(1), ProductId::Numeric(2), ProductId::Numeric(3)]
    );
    assert_eq!(products[1].price().amount(), 8.0);
}

#[tokio::test]
async fn refresh_then_filter_end_to_end() {
    let server = TestServer::spawn().await;
    let loader = server.loader("/api/products");
    let mut session = StorefrontSession::new();

    refresh(&mut session, &loader).await.unwrap();

    let categories: Vec<&str> = session.categories().iter().map(String::as_str).collect();
    assert_eq!(categories, vec!["Apparel", "Kitchen"]);

    let visible = session
        .apply(FilterCriteria::from_inputs("", ["Apparel"], "10", "21"))
        .unwrap();
    let names: Vec<&str> = visible.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Red Shirt"]);

    let visible = session
        .apply(FilterCriteria::from_inputs("MUG", Vec::<String>::new(), "", ""))
        .unwrap();
    assert_eq!(visible.len(), 1);
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = TestServer::spawn().await;
    let loader = server.loader("/api/broken");
    let mut session = StorefrontSession::new();

    let err = refresh(&mut session, &loader).await.unwrap_err();

    match err {
        LoadError::Api(status, body) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database is down");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(
        session.state(),
        &LoadState::Failed {
            message: FETCH_FAILED_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn unreadable_error_body_still_reports_status() {
    let server = TestServer::spawn().await;
    let err = server.loader("/api/truncated").load().await.unwrap_err();

    match err {
        LoadError::Api(status, body) => {
            assert_eq!(status, 500);
            assert!(body.is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_endpoint_is_an_api_error() {
    let server = TestServer::spawn().await;
    let err = server.loader("/api/nope").load().await.unwrap_err();

    assert!(matches!(err, LoadError::Api(404, _)));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = TestServer::spawn().await;
    let err = server.loader("/api/garbage").load().await.unwrap_err();

    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn invalid_record_fails_whole_load() {
    let server = TestServer::spawn().await;
    let err = server.loader("/api/negative").load().await.unwrap_err();

    assert!(matches!(err, LoadError::InvalidRecord { index: 0, .. }));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = TestServer::spawn().await;
    let err = server.loader("/api/slow").load().await.unwrap_err();

    assert!(matches!(err, LoadError::Network(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default()
        .with_api_url(format!("http://{}", addr))
        .unwrap();
    let loader = HttpCatalogLoader::new(&config).unwrap();

    let err = loader.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Network(_)));
}
