use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{doc::ApiDoc, handlers, middleware, state::AppState};

pub fn router(state: AppState, max_body_size: usize) -> Router {
    // Layers go on each method router with `route_layer` so an unmatched
    // method still falls through to 405 instead of hitting the auth check.
    let verified = from_fn_with_state(state.clone(), middleware::require_auth);
    // Bearer header required but not verified
    let bearer_only = from_fn(middleware::require_bearer);

    Router::new()
        // Public routes
        .route("/", get(handlers::serve_root))
        .route("/token", post(handlers::handle_login))
        // Users
        .route(
            "/users",
            post(handlers::create_user)
                .get(handlers::list_users)
                .route_layer(verified.clone()),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .route_layer(verified.clone())
                .merge(delete(handlers::delete_user).route_layer(bearer_only)),
        )
        // Tasks
        .route(
            "/tasks",
            post(handlers::create_task)
                .get(handlers::list_tasks)
                .route_layer(verified.clone()),
        )
        .route(
            "/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task)
                .route_layer(verified.clone()),
        )
        .route(
            "/tasks/:id/complete",
            patch(handlers::complete_task).route_layer(verified),
        )
        // API docs
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_size)),
        )
        .with_state(state)
}
