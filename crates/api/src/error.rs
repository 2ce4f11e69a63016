//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_storage::StorageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by the route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Query failed or the database is unreachable
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A temperature range matched no observations
    #[error("no temperature observations between {start} and {end}")]
    NoObservations { start: String, end: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoObservations { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Storage(_) => "storage",
            ApiError::NoObservations { .. } => "no_observations",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        metrics::counter!("climate_api_errors_total", "kind" => self.kind()).increment(1);

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_observations_is_not_found() {
        let err = ApiError::NoObservations {
            start: "2018-01-01".to_string(),
            end: "2017-08-23".to_string(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "no temperature observations between 2018-01-01 and 2017-08-23"
        );
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err = ApiError::from(StorageError::MissingTable("station".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
