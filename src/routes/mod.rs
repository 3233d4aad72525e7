pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Registers every route. Expects `AuthService`, `TaskService` and
/// `SessionKeys` in app data (see [`crate::app::AppServices`]).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::set_task_completion)
                .service(tasks::delete_task),
        );
}
