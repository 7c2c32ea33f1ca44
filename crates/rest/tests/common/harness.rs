//! Sends requests through either router over the same handlers.

use std::sync::Arc;

use axum::Router;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::{BodyExt, Full};
use itemstore_persistence::core::ItemStore;
use itemstore_rest::{AppState, MinimalRouter, ServerConfig, create_app_with_state};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

/// Which router a request goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Mux,
    Minimal,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Flavor::Mux, Flavor::Minimal];
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not the expected JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn header(&self, name: impl header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Asserts the uniform error body and returns its message.
    pub fn error_message(&self, expected_path: &str) -> String {
        let body: Value = self.json();
        assert_eq!(body["path"], expected_path, "error path");
        body["error"]
            .as_str()
            .expect("error message is a string")
            .to_string()
    }
}

/// One router over one store.
pub struct Harness<S: ItemStore + 'static> {
    pub flavor: Flavor,
    pub store: Arc<S>,
    app: Option<Router>,
    minimal: Option<MinimalRouter<S>>,
}

impl<S: ItemStore + 'static> Harness<S> {
    pub fn new(flavor: Flavor, store: S) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(Arc::clone(&store), ServerConfig::for_testing());
        Self::with_state(flavor, state)
    }

    pub fn with_state(flavor: Flavor, state: AppState<S>) -> Self {
        let store = state.storage_arc();
        match flavor {
            Flavor::Mux => Self {
                flavor,
                store,
                app: Some(create_app_with_state(state)),
                minimal: None,
            },
            Flavor::Minimal => Self {
                flavor,
                store,
                app: None,
                minimal: Some(MinimalRouter::new(state).expect("route table builds")),
            },
        }
    }

    pub async fn send(&self, request: Request<Full<Bytes>>) -> TestResponse {
        let response = match (&self.app, &self.minimal) {
            (Some(app), _) => {
                let response = app.clone().oneshot(request).await.expect("infallible");
                let (parts, body) = response.into_parts();
                let body = body.collect().await.expect("body collects").to_bytes();
                http::Response::from_parts(parts, body)
            }
            (None, Some(minimal)) => {
                let response = minimal.dispatch(request).await;
                let (parts, body) = response.into_parts();
                let body = body.collect().await.expect("body collects").to_bytes();
                http::Response::from_parts(parts, body)
            }
            (None, None) => unreachable!("harness has a router"),
        };

        let (parts, body) = response.into_parts();
        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<&Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Full::new(Bytes::from(serde_json::to_vec(json).expect("serializable")))
            }
            None => Full::new(Bytes::new()),
        };
        self.send(builder.body(body).expect("valid request")).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, &[], None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, &[], Some(body)).await
    }

    pub async fn put(&self, uri: &str, if_match: Option<&str>, body: &Value) -> TestResponse {
        match if_match {
            Some(token) => {
                self.request(Method::PUT, uri, &[("if-match", token)], Some(body))
                    .await
            }
            None => self.request(Method::PUT, uri, &[], Some(body)).await,
        }
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, &[], None).await
    }

    /// Creates an item and returns the created body.
    pub async fn create(&self, body: &Value) -> Value {
        let response = self.post("/items", body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}: create", self.flavor);
        response.json()
    }
}
