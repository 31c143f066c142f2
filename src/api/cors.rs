//! Origin checks and CORS response headers.
//!
//! Unlike a wildcard CORS policy, every response echoes the caller's `Origin` back verbatim, so
//! browsers only let allowed origins read the response.

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method,
    },
    response::{IntoResponse, Response},
};

use crate::{
    api::{self, Error},
    config::ALLOWED_ORIGINS_VAR,
    Config,
};

/// The request headers clients may send to the API.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Gets the value of the request's `Origin` header. A missing or non-ASCII header is treated as an
/// empty origin, which is never allowed.
pub fn request_origin(headers: &HeaderMap) -> &str {
    headers
        .get(ORIGIN)
        .and_then(|origin| origin.to_str().ok())
        .unwrap_or_default()
}

/// Checks the origin against the configured allow-list.
///
/// # Errors
///
/// Returns [`Error::ConfigurationMissing`] if there is no allow-list, or [`Error::OriginDenied`]
/// if the origin isn't in it.
pub fn check_origin(config: &Config, origin: &str) -> api::Result<()> {
    let Some(allowed_origins) = &config.allowed_origins else {
        return Err(Error::ConfigurationMissing(ALLOWED_ORIGINS_VAR));
    };

    if !allowed_origins.allows(origin) {
        return Err(Error::OriginDenied);
    }

    Ok(())
}

/// Builds the CORS headers for a response to the specified origin, permitting the specified
/// methods.
pub fn cors_headers(origin: &str, methods: &[Method]) -> HeaderMap {
    let methods = methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut headers = HeaderMap::new();

    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(origin).expect("origin should come from a valid header value"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_str(&methods).expect("method names should be valid header values"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(VARY, HeaderValue::from_static("Origin"));

    headers
}

/// Builds the CORS headers for a successful preflight response, which additionally allow
/// credentials.
pub fn preflight_headers(origin: &str, methods: &[Method]) -> HeaderMap {
    let mut headers = cors_headers(origin, methods);

    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );

    headers
}

/// Converts a handler's result into a response carrying the CORS headers for the origin and
/// methods.
pub fn respond<T: IntoResponse>(
    origin: &str,
    methods: &[Method],
    result: api::Result<T>,
) -> Response {
    (cors_headers(origin, methods), result).into_response()
}
