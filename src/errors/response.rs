use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::errors::{AppError, StoreError, TokenError};

// Body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

// The IntoResponse trait implementation converts AppError into a `{"detail": ...}` JSON response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => detail(StatusCode::BAD_REQUEST, msg),

            // Bad credentials and missing bearer headers
            AppError::Unauthorized(msg) => unauthorized(msg),

            AppError::Token(err) => convert_token_error(err),

            AppError::Store(err) => convert_store_error(err),

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}

fn detail(status: StatusCode, msg: String) -> Response {
    (status, Json(ErrorDetail { detail: msg })).into_response()
}

fn unauthorized(msg: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(ErrorDetail { detail: msg }),
    )
        .into_response()
}

// Helper function to convert token errors to responses
fn convert_token_error(err: TokenError) -> Response {
    match err {
        TokenError::Expired | TokenError::Invalid => unauthorized(err.to_string()),
        TokenError::Encoding(e) => {
            tracing::error!("Token signing failed: {}", e);
            detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    }
}

fn convert_store_error(err: StoreError) -> Response {
    match err {
        StoreError::NotFound { .. } => detail(StatusCode::NOT_FOUND, err.to_string()),
        StoreError::Conflict(msg) => detail(StatusCode::CONFLICT, msg),
    }
}

// Extractor rejections surface as validation errors with the same body shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
