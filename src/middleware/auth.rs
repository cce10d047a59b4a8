use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::errors::AppError;
use crate::state::AppState;

type BearerHeader = TypedHeader<Authorization<Bearer>>;

fn not_authenticated() -> Response {
    AppError::Unauthorized("Not authenticated".into()).into_response()
}

// Verifies the bearer token and stores its claims in request extensions.
// Nothing behind this layer runs unless verification succeeds.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let Ok(TypedHeader(Authorization(bearer))) =
        BearerHeader::from_request_parts(&mut parts, &state).await
    else {
        tracing::warn!("Missing bearer token for {} {}", parts.method, parts.uri.path());
        return not_authenticated();
    };

    match state.tokens.verify(bearer.token()) {
        Ok(claims) => {
            tracing::debug!("Authenticated {} for {}", claims.sub, parts.uri.path());
            parts.extensions.insert(claims);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(e) => {
            tracing::warn!("Rejected token for {}: {}", parts.uri.path(), e);
            AppError::from(e).into_response()
        }
    }
}

// Only checks that a bearer header is present; the token is NOT verified.
// Used by DELETE /users/{id}, which has never verified tokens.
pub async fn require_bearer(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if BearerHeader::from_request_parts(&mut parts, &()).await.is_err() {
        return not_authenticated();
    }

    next.run(Request::from_parts(parts, body)).await
}
