//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Fatal errors raised before the service starts listening.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("config: {0}")]
    Config(String),
    #[error("database connect: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("schema setup: {0}")]
    Schema(#[source] sqlx::Error),
    #[error("bootstrap: {0}")]
    Bootstrap(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors on the request path. All of them surface as a server error; no partial results.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("storage unavailable: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("schema validation: {0}")]
    SchemaValidation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "connection_error",
            AppError::SchemaValidation(_) => "schema_validation_error",
            AppError::Db(_) => "database_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the log; clients only see the code.
        tracing::error!(code = self.code(), error = %self, "request failed");
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: "internal server error".to_string(),
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_variant_is_a_server_error() {
        let errors = [
            AppError::Connection(sqlx::Error::PoolTimedOut),
            AppError::SchemaValidation("cost is required".into()),
            AppError::Db(sqlx::Error::RowNotFound),
        ];
        for err in errors {
            let code = err.code();
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], code);
            assert_eq!(body["error"]["message"], "internal server error");
        }
    }
}
