//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock catalog injected, so searches run without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use randomsong_core::{
    testing::MockCatalog, Config, FilterCriteria, KeySampler, MemoryLibrary, RandomSelector,
    SelectorConfig, ServerConfig,
};
use randomsong_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use randomsong_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_random() {
///     let fixture = TestFixture::new().await;
///     fixture.catalog.set_latest(fixtures::item(0xff)).await;
///
///     let response = fixture.post("/api/v1/random", json!({})).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure newest item, keyed items and scripted fetches
    pub catalog: Arc<MockCatalog>,
    /// In-memory library - mark maps as owned
    pub library: Arc<MemoryLibrary>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let catalog = Arc::new(MockCatalog::new());
        let library = Arc::new(MemoryLibrary::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            search: test_config.search.clone(),
            filter: test_config.filter.clone(),
            ..Default::default()
        };

        let selector = Arc::new(
            RandomSelector::new(
                Arc::clone(&catalog) as Arc<dyn randomsong_core::Catalog>,
                Arc::clone(&library) as Arc<dyn randomsong_core::Library>,
                config.search.clone(),
            )
            .with_sampler(KeySampler::with_seed(test_config.seed)),
        );

        let state = Arc::new(AppState::new(config, selector));
        let router = create_router(state);

        Self {
            router,
            catalog,
            library,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Send a GET request and return the raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Configured filter; `None` accepts everything
    pub filter: Option<FilterCriteria>,
    pub search: SelectorConfig,
    /// Sampler seed, for reproducible key draws
    pub seed: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            filter: Some(FilterCriteria::default()),
            search: SelectorConfig::default(),
            seed: 7,
        }
    }
}

impl TestConfig {
    /// Create config without any filter.
    pub fn unfiltered() -> Self {
        Self {
            filter: None,
            ..Default::default()
        }
    }

    /// Create config with a custom attempt budget.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            search: SelectorConfig {
                max_retries,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
