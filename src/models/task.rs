use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{check_length, finish};
use crate::errors::AppResult;
use crate::services::store::Record;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

// Body for both POST /tasks and PUT /tasks/{id}
#[derive(Debug, Deserialize, Clone, ToSchema)]
pub struct TaskCreate {
    #[schema(min_length = 1, max_length = 200)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TaskCreate {
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();
        check_length(&mut problems, "title", &self.title, 1, Some(200));
        finish(problems)
    }
}

#[derive(Debug, Clone)]
pub enum TaskChange {
    // Full replacement of the editable fields
    Replace {
        title: String,
        description: Option<String>,
    },
    Complete,
}

impl From<TaskCreate> for TaskChange {
    fn from(input: TaskCreate) -> Self {
        TaskChange::Replace {
            title: input.title,
            description: input.description,
        }
    }
}

impl Record for Task {
    type Draft = TaskCreate;
    type Change = TaskChange;

    const KIND: &'static str = "Task";

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, created_at: DateTime<Utc>, draft: TaskCreate) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at,
        }
    }

    fn apply(&mut self, change: TaskChange) {
        match change {
            TaskChange::Replace { title, description } => {
                self.title = title;
                self.description = description;
            }
            TaskChange::Complete => self.completed = true,
        }
    }
}
