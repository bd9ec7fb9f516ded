#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use tracking::model::TOKEN_FIELD;
use tracking::storage::Database;
use tracking::web::{AppState, router};

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub cache_control: Option<String>,
    pub body: String,
}

impl TestApp {
    pub fn new(db: Database) -> Self {
        let state = AppState::new(db);
        let router = router(state.clone());
        Self { state, router }
    }

    pub fn token(&self) -> String {
        self.state.form_token.to_string()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// POST url-encoded `fields`, adding the valid form token.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let token = self.token();
        let mut all: Vec<(&str, &str)> = fields.to_vec();
        all.push((TOKEN_FIELD, &token));
        self.post_raw(uri, &all).await
    }

    /// POST url-encoded `fields` exactly as given.
    pub async fn post_raw(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = encode_form(fields);
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let location = header_value(header::LOCATION);
        let cache_control = header_value(header::CACHE_CONTROL);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            location,
            cache_control,
            body: String::from_utf8_lossy(&bytes).to_string(),
        }
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("form body")
}
