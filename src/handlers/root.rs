use axum::Json;
use serde_json::{json, Value};

#[utoipa::path(
    get,
    path = "/",
    tag = "General",
    responses((status = 200, description = "Service name, version and status"))
)]
pub async fn serve_root() -> Json<Value> {
    Json(json!({
        "message": "Taskboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
