use std::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{check_email, check_length, finish};
use crate::errors::AppResult;
use crate::services::store::Record;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserCreate {
    #[schema(min_length = 3, max_length = 50)]
    pub username: String,
    pub email: String,
    #[schema(min_length = 8)]
    pub password: String, // validated only, never stored
}

impl UserCreate {
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();
        check_length(&mut problems, "username", &self.username, 3, Some(50));
        check_email(&mut problems, "email", &self.email);
        check_length(&mut problems, "password", &self.password, 8, None);
        finish(problems)
    }
}

impl Record for User {
    type Draft = UserCreate;
    type Change = Infallible;

    const KIND: &'static str = "User";

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, created_at: DateTime<Utc>, draft: UserCreate) -> Self {
        Self {
            id,
            username: draft.username,
            email: draft.email,
            is_active: true,
            created_at,
        }
    }

    // Exact, case-sensitive email match.
    fn conflict(&self, draft: &UserCreate) -> Option<String> {
        (self.email == draft.email).then(|| "User with this email already exists".to_string())
    }

    fn apply(&mut self, change: Infallible) {
        match change {}
    }
}
