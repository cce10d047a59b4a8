pub mod auth;
mod extract;
pub mod root;
pub mod tasks;
pub mod users;

pub use auth::handle_login;
pub use root::serve_root;
pub use tasks::{complete_task, create_task, delete_task, get_task, list_tasks, update_task};
pub use users::{create_user, delete_user, get_user, list_users};
