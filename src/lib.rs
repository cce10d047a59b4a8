pub mod config;
pub mod doc;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use crate::config::Config;
pub use crate::errors::{AppError, AppResult};
pub use crate::routes::router;
pub use crate::state::AppState;
