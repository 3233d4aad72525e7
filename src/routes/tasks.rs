use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    auth::Identity,
    error::AppError,
    models::{CompletionUpdate, NewTask, TaskUpdate},
    tasks::TaskService,
};

// Every handler here takes `Identity` first: no token, no handler.

/// Lists the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, possibly empty.
/// - `403 Forbidden`: Missing or invalid token.
/// - `500 Internal Server Error`: Store failure.
#[get("")]
pub async fn list_tasks(
    identity: Identity,
    tasks: web::Data<TaskService>,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(identity).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller, not yet completed.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters.
/// - `description` (optional): up to 2000 characters, defaults to "".
///
/// ## Responses:
/// - `201 Created`: The new task.
/// - `400 Bad Request`: Body is not JSON or `title` is missing.
/// - `403 Forbidden`: Missing or invalid token.
/// - `422 Unprocessable Entity`: Field validation failed.
/// - `500 Internal Server Error`: Store failure.
#[post("")]
pub async fn create_task(
    identity: Identity,
    tasks: web::Data<TaskService>,
    body: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = tasks.create(identity, &body).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Replaces title, description and completed of one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `403 Forbidden`: Missing or invalid token.
/// - `404 Not Found`: No such task, or it belongs to another user.
/// - `422 Unprocessable Entity`: Field validation failed.
/// - `500 Internal Server Error`: Store failure.
#[put("/{id}")]
pub async fn update_task(
    identity: Identity,
    tasks: web::Data<TaskService>,
    task_id: web::Path<i32>,
    body: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = tasks.update(identity, task_id.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets only the completed flag of one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `403 Forbidden`: Missing or invalid token.
/// - `404 Not Found`: No such task, or it belongs to another user.
/// - `500 Internal Server Error`: Store failure.
#[put("/{id}/completion")]
pub async fn set_task_completion(
    identity: Identity,
    tasks: web::Data<TaskService>,
    task_id: web::Path<i32>,
    body: web::Json<CompletionUpdate>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .set_completion(identity, task_id.into_inner(), body.completed)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: Plain-text "Task deleted".
/// - `403 Forbidden`: Missing or invalid token.
/// - `404 Not Found`: No such task, or it belongs to another user.
/// - `500 Internal Server Error`: Store failure.
#[delete("/{id}")]
pub async fn delete_task(
    identity: Identity,
    tasks: web::Data<TaskService>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    tasks.delete(identity, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Task deleted"))
}
