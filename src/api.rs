//! The HTTP API, exposed under `/api/`.

pub mod cors;
pub mod routes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dropdown::ShapeError;

/// An API error. Every variant becomes a JSON [`ErrorBody`] response.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required environment variable isn't set.
    #[error("environment variable `{0}` is not set")]
    ConfigurationMissing(&'static str),

    /// The request's origin isn't in the allow-list.
    #[error("Origin not allowed")]
    OriginDenied,

    /// No database ID is configured to list rows from.
    #[error("Must have a main db Id")]
    ResourceMissing,

    /// A database row doesn't have the shape a dropdown item needs.
    #[error(transparent)]
    DataShape(#[from] ShapeError),

    /// The request to Notion failed.
    #[error("Notion request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The request body isn't valid JSON of the expected shape.
    #[error("malformed request body: {0}")]
    BodyMalformed(#[from] serde_json::Error),

    /// The requested API route doesn't exist.
    #[error("Not Found")]
    RouteNotFound,
}

impl Error {
    /// Gets the response status code corresponding to the error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::OriginDenied => StatusCode::FORBIDDEN,
            Self::ResourceMissing => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::ConfigurationMissing(_)
            | Self::DataShape(_)
            | Self::Upstream(_)
            | Self::BodyMalformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the JSON body sent to the client. Server errors get a generic
    /// message with the details in `error`.
    pub fn body(&self) -> ErrorBody {
        if self.status().is_server_error() {
            ErrorBody {
                message: "Internal Server Error".into(),
                error: Some(self.to_string()),
            }
        } else {
            ErrorBody {
                message: self.to_string(),
                error: None,
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// The JSON body of an error response.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ErrorBody {
    /// A message describing the error.
    pub message: String,

    /// Details about a server error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The result of an API route handler.
pub type Result<T> = std::result::Result<T, Error>;
