//! Common code for integration tests

use anyhow::Error;
use axum::{
    body::{self, Body, Bytes},
    http::{header::ORIGIN, HeaderMap, Method, Request, StatusCode},
};
use rca_dropdown::{api::routes, config::AllowedOrigins, notion::NOTION_VERSION, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// An origin in the test allow-list.
pub const ALLOWED_ORIGIN: &str = "https://rca.example";

/// The ID of the test database.
pub const DB_ID: &str = "0f3c1a5e-main-db";

/// The Notion secret the test server is configured with.
pub const SECRET: &str = "secret_test";

/// Builds a configuration pointing at a mock Notion API.
pub fn config(notion: &MockServer) -> Config {
    Config {
        address: "127.0.0.1:0".into(),
        notion_secret: Some(SECRET.into()),
        main_db_id: Some(DB_ID.into()),
        allowed_origins: Some(AllowedOrigins::parse(&format!(
            "http://localhost:3000, {ALLOWED_ORIGIN}"
        ))),
        notion_api_url: notion.uri(),
    }
}

/// Builds a Notion page JSON object with a plain text `Name` title.
pub fn page(id: &str, name: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{
                    "type": "text",
                    "text": { "content": name, "link": null },
                    "plain_text": name,
                }],
            },
            "Status": { "id": "abc", "type": "status", "status": null },
        },
    })
}

/// Mounts a database query on the mock Notion API which responds with the specified pages and is
/// expected to be called `times` times.
pub async fn mount_query(notion: &MockServer, pages: Vec<Value>, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{DB_ID}/query")))
        .and(header("authorization", format!("Bearer {SECRET}").as_str()))
        .and(header("notion-version", NOTION_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": pages,
            "next_cursor": null,
            "has_more": false,
        })))
        .expect(times)
        .mount(notion)
        .await;
}

/// A response from the API router, split into its parts.
#[derive(Debug)]
pub struct TestResponse {
    /// The response status.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The full response body.
    pub body: Bytes,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Gets a response header as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Sends a request through the API router configured with `config`.
pub async fn send(
    config: Config,
    method: Method,
    uri: &str,
    origin: Option<&str>,
    body: Body,
) -> Result<TestResponse, Error> {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(origin) = origin {
        request = request.header(ORIGIN, origin);
    }

    let response = routes::router(AppState::new(config))
        .oneshot(request.body(body)?)
        .await?;

    let (parts, body) = response.into_parts();

    Ok(TestResponse {
        status: parts.status,
        headers: parts.headers,
        body: body::to_bytes(body, usize::MAX).await?,
    })
}
