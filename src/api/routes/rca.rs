//! The RCA dropdown resource: the rows of the main Notion database as `{id, name}` items.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_macros::debug_handler;
use serde::{de, Serialize};
use serde_json::Value;

use crate::{
    api::{self, cors, Error},
    config::NOTION_SECRET_VAR,
    dropdown::{dropdown_items, DropdownItem},
    AppState,
};

/// Every method this route answers.
static ROUTE_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// The message confirming a `POST` request body was received.
const RECEIVED_MESSAGE: &str = "Data successfully received";

/// Answers a CORS preflight request.
#[expect(clippy::unused_async, reason = "Axum route handlers must be async")]
#[debug_handler]
pub async fn options(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let origin = cors::request_origin(&headers);

    match cors::check_origin(&state.config, origin) {
        Ok(()) => (
            StatusCode::NO_CONTENT,
            cors::preflight_headers(origin, &ROUTE_METHODS),
        )
            .into_response(),
        Err(error) => cors::respond::<()>(origin, &ROUTE_METHODS, Err(error)),
    }
}

/// Lists the rows of the main database as dropdown items.
#[debug_handler]
pub async fn get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let origin = cors::request_origin(&headers);
    let result = list(&state, origin).await;

    with_cors(origin, Method::GET, result.map(Json))
}

/// Fetches the main database's rows and converts them into dropdown items.
///
/// # Errors
///
/// See [`crate::api::Error`].
async fn list(state: &AppState, origin: &str) -> api::Result<Vec<DropdownItem>> {
    // A missing database is reported before the origin is checked.
    let Some(db_id) = &state.config.main_db_id else {
        return Err(Error::ResourceMissing);
    };

    cors::check_origin(&state.config, origin)?;

    if !state.notion.has_secret() {
        return Err(Error::ConfigurationMissing(NOTION_SECRET_VAR));
    }

    let pages = state.notion.query_database(db_id).await?;
    let items = dropdown_items(&pages)?;

    tracing::info!(items = items.len(), "listed dropdown items");

    Ok(items)
}

/// Echoes a submitted dropdown selection back with a confirmation message.
#[expect(clippy::unused_async, reason = "Axum route handlers must be async")]
#[debug_handler]
pub async fn post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let origin = cors::request_origin(&headers);
    let result = cors::check_origin(&state.config, origin).and_then(|()| echo(&body));

    with_cors(origin, Method::POST, result.map(Json))
}

/// Parses a `POST` request body and builds its response.
///
/// # Errors
///
/// Returns [`Error::BodyMalformed`] if the body isn't a JSON object.
fn echo(body: &[u8]) -> api::Result<PostResponse> {
    let Value::Object(mut fields) = serde_json::from_slice::<Value>(body)? else {
        return Err(Error::BodyMalformed(de::Error::custom(
            "expected the body to be a JSON object",
        )));
    };

    Ok(PostResponse {
        id: fields.remove("id"),
        name: fields.remove("name"),
        message: RECEIVED_MESSAGE,
    })
}

/// A `POST` response body for this API route. Fields missing from the request are left out.
#[derive(Serialize, Debug)]
pub struct PostResponse {
    /// The selected item's ID, as received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// The selected item's name, as received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// A confirmation that the request was received.
    pub message: &'static str,
}

/// Attaches CORS headers to a handler's result. Denied origins are told every method the route
/// permits, while other responses only permit the method that was used.
fn with_cors<T: IntoResponse>(origin: &str, method: Method, result: api::Result<T>) -> Response {
    let method = [method];
    let methods: &[Method] = if matches!(result, Err(Error::OriginDenied)) {
        &ROUTE_METHODS
    } else {
        &method
    };

    cors::respond(origin, methods, result)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn echo_keeps_any_json_values() -> anyhow::Result<()> {
        let response = echo(br#"{"id": 7, "name": ["a", "b"], "extra": true}"#)?;

        assert_eq!(
            serde_json::to_value(response)?,
            json!({ "id": 7, "name": ["a", "b"], "message": RECEIVED_MESSAGE }),
        );

        Ok(())
    }

    #[test]
    fn echo_omits_missing_fields() -> anyhow::Result<()> {
        let response = echo(br#"{"name": null}"#)?;

        assert_eq!(
            serde_json::to_value(response)?,
            json!({ "name": null, "message": RECEIVED_MESSAGE }),
        );

        Ok(())
    }

    #[test]
    fn echo_rejects_malformed_json() {
        let bodies: [&[u8]; 6] = [b"{\"id\": ", b"", b"[1, 2]", b"\"text\"", b"42", b"null"];

        for body in bodies {
            assert!(
                matches!(echo(body), Err(Error::BodyMalformed(_))),
                "body {:?} should be malformed",
                String::from_utf8_lossy(body),
            );
        }
    }
}
