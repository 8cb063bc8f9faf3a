use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::postgres::PoolError;
use crate::users::MappingError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Pool(#[from] PoolError),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] MappingError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Pool(PoolError::Exhausted(_)) => "POOL_EXHAUSTED",
            AppError::Pool(PoolError::Query(_)) => "QUERY_ERROR",
            AppError::Pool(PoolError::Connection(_) | PoolError::Closed) => "DATABASE_UNAVAILABLE",
            AppError::Mapping(_) => "MAPPING_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let code = self.code();

        // Details stay in the server log; clients only see a generic failure
        tracing::error!(
            code = %code,
            status = %status.as_u16(),
            message = %self,
            "API error"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: "Internal server error".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_every_error_is_a_server_error() {
        let errors = vec![
            AppError::Pool(PoolError::Exhausted(Duration::from_secs(30))),
            AppError::Pool(PoolError::Closed),
            AppError::Pool(PoolError::Connection("refused".into())),
            AppError::Mapping(MappingError::MissingColumn {
                column: "email".into(),
            }),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn test_error_body_hides_details() {
        let error = AppError::Pool(PoolError::Connection(
            "password authentication failed for user \"postgres\"".into(),
        ));
        let body = body_json(error.into_response()).await;

        assert_eq!(body["error"]["code"], "DATABASE_UNAVAILABLE");
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(!body.to_string().contains("password"));
    }

    #[test]
    fn test_error_codes() {
        let exhausted = AppError::from(PoolError::Exhausted(Duration::from_secs(1)));
        assert_eq!(exhausted.code(), "POOL_EXHAUSTED");

        let mapping = AppError::from(MappingError::TypeMismatch {
            column: "id".into(),
            expected: "integer",
        });
        assert_eq!(mapping.code(), "MAPPING_ERROR");
    }
}
