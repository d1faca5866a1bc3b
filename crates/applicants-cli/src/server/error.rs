//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use applicants_core::{ApplicantId, Error};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Applicant {0} not found")]
    NotFound(ApplicantId),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    #[error("Internal error: {0}")]
    Internal(Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(JsonRejection::JsonDataError(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::InvalidRequest(_) | ApiError::MalformedBody(_) => "InvalidRequest",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { id } => ApiError::NotFound(id),
            Error::InvalidInput(e) => ApiError::InvalidRequest(e.to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "Request failed");
        }

        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applicants_core::error::{InvalidInputError, TransportError};

    #[test]
    fn store_errors_map_to_statuses() {
        let not_found = ApiError::from(Error::not_found(ApplicantId::new(3)));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.code(), "NotFound");

        let invalid = ApiError::from(Error::InvalidInput(InvalidInputError::Other {
            message: "bad".to_string(),
        }));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let io = ApiError::from(Error::StoreUnavailable(TransportError::Io {
            message: "disk full".to_string(),
        }));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.code(), "InternalError");

        let corrupt = ApiError::from(Error::malformed("expected value at line 1"));
        assert_eq!(corrupt.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(corrupt.code(), "InternalError");
    }
}
