use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, AppResult};
use crate::services::store::Page;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    #[param(minimum = 0, default = 0)]
    pub skip: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> AppResult<Page> {
        page(self.skip, self.limit)
    }
}

// serde_urlencoded cannot flatten non-string fields, so tasks repeat skip/limit.
#[derive(Debug, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    #[param(minimum = 0, default = 0)]
    pub skip: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
}

impl TaskQuery {
    pub fn page(&self) -> AppResult<Page> {
        page(self.skip, self.limit)
    }
}

fn page(skip: Option<i64>, limit: Option<i64>) -> AppResult<Page> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    let mut problems = Vec::new();
    if skip < 0 {
        problems.push("skip: must be greater than or equal to 0".to_string());
    }
    if !(1..=MAX_LIMIT).contains(&limit) {
        problems.push(format!("limit: must be between 1 and {}", MAX_LIMIT));
    }
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    Ok(Page {
        skip: usize::try_from(skip).unwrap_or(usize::MAX),
        limit: usize::try_from(limit).unwrap_or(usize::MAX),
    })
}
