use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum SylvaError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    /// Display is the driver's message verbatim; it is also what the client sees.
    #[error("{0}")]
    Storage(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<argon2::Error> for SylvaError {
    fn from(e: argon2::Error) -> Self {
        SylvaError::PasswordHash(e.to_string())
    }
}

impl From<argon2::password_hash::Error> for SylvaError {
    fn from(e: argon2::password_hash::Error) -> Self {
        SylvaError::PasswordHash(e.to_string())
    }
}

impl IntoResponse for SylvaError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            SylvaError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: "Invalid credentials".to_string(),
                },
            ),
            SylvaError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "MISSING_TOKEN".to_string(),
                    message: "Access denied".to_string(),
                },
            ),
            SylvaError::InvalidToken => (
                StatusCode::FORBIDDEN,
                ApiErrorBody {
                    code: "INVALID_TOKEN".to_string(),
                    message: "Invalid token".to_string(),
                },
            ),
            SylvaError::Storage(e) => {
                error!(error = %e, "storage fault");
                // Raw driver text is returned to the caller as-is.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "STORAGE_ERROR".to_string(),
                        message: e.to_string(),
                    },
                )
            }
            e @ (SylvaError::PasswordHash(_)
            | SylvaError::TokenSigning(_)
            | SylvaError::Task(_)) => {
                error!(error = %e, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: SylvaError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, serde_json::from_slice(&bytes).expect("body was not json"))
    }

    #[tokio::test]
    async fn guard_rejections_map_to_401_and_403() {
        let (status, body) = body_of(SylvaError::MissingToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");

        let (status, body) = body_of(SylvaError::InvalidToken).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn storage_message_is_passed_through() {
        let err = SylvaError::Storage(SqlxError::Protocol("connection reset".to_string()));
        let expected = err.to_string();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        assert_eq!(body["error"]["message"], expected.as_str());
    }
}
