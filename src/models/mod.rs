mod user;
mod forms;
mod task;
mod validation;

pub use user::{User, UserCreate};
pub use forms::{LoginForm, Pagination, TaskQuery, TokenResponse};
pub use task::{Task, TaskChange, TaskCreate};
