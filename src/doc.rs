use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::response::ErrorDetail;
use crate::handlers::{auth, root, tasks, users};
use crate::models::{LoginForm, Task, TaskCreate, TokenResponse, User, UserCreate};

// Registers the bearer scheme referenced by `security(("bearer" = []))`.
struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /token"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAddon),
    info(
        title = "Taskboard API",
        description = "Bearer-token authenticated CRUD over users and tasks."
    ),
    paths(
        root::serve_root,
        auth::handle_login,
        users::create_user,
        users::list_users,
        users::get_user,
        users::delete_user,
        tasks::create_task,
        tasks::list_tasks,
        tasks::get_task,
        tasks::update_task,
        tasks::complete_task,
        tasks::delete_task,
    ),
    components(schemas(User, UserCreate, Task, TaskCreate, LoginForm, TokenResponse, ErrorDetail)),
    tags(
        (name = "General", description = "Service metadata"),
        (name = "Authentication", description = "Token issuing"),
        (name = "Users", description = "User management"),
        (name = "Tasks", description = "Task management")
    )
)]
pub struct ApiDoc;
