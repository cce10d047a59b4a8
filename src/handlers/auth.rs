use axum::{extract::State, Json};

use super::extract::FormBody;
use crate::errors::{response::ErrorDetail, AppError, AppResult};
use crate::models::{LoginForm, TokenResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/token",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorDetail)
    )
)]
#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    FormBody(login_form): FormBody<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let identity = state
        .credentials
        .authenticate(&login_form.username, &login_form.password)
        .ok_or_else(|| {
            tracing::warn!("Invalid credentials for user: {}", login_form.username);
            AppError::Unauthorized("Incorrect username or password".into())
        })?;

    let token = state.tokens.issue(&identity.username)?;

    tracing::info!("Issued access token for user: {}", identity.username);
    Ok(Json(TokenResponse::bearer(token)))
}
