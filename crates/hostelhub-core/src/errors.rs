//! Application error type with HTTP response conversion.
//!
//! Every handler and service returns [`AppError`]. It pairs an
//! [`anyhow::Error`] with the HTTP status the client should see, plus optional
//! structured details that are merged into the JSON body.
//!
//! # Taxonomy
//!
//! | Kind | Constructor | Status |
//! |------|-------------|--------|
//! | Validation | [`AppError::bad_request`] | 400 |
//! | Authentication | [`AppError::unauthorized`] | 401 |
//! | Authorization | [`AppError::forbidden`] | 403 |
//! | Not found | [`AppError::not_found`] | 404 |
//! | Conflict | [`AppError::conflict`] | 409 |
//! | Dependency | [`AppError::dependency`] | 409 |
//! | Internal | [`AppError::internal_error`], [`AppError::database`] | 500 |
//!
//! Server errors are logged and rendered with a generic message, so raw
//! database errors never reach the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub details: Option<Map<String, Value>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            details: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Error::msg(message.into()),
        )
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, Error::msg(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, Error::msg(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    /// A delete was refused because other rows still reference the target.
    ///
    /// `related` is serialized under the `related` key of the response body,
    /// typically a map of table name to row count.
    pub fn dependency<T>(message: impl Into<String>, related: &T) -> Self
    where
        T: Serialize,
    {
        let related = serde_json::to_value(related).unwrap_or(Value::Null);
        Self::new(StatusCode::CONFLICT, Error::msg(message.into())).with_detail("related", related)
    }

    /// Attach an extra top-level field to the JSON error body.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// The message rendered to the client.
    pub fn client_message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.client_message()));
        if let Some(details) = self.details {
            body.extend(details);
        }

        (self.status, Json(Value::Object(body))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
