use crate::{
    domain::{
        MessageResponse, RespondWith, ADD_TODO_FAILED, DELETE_TODO_FAILED, FETCH_TODOS_FAILED,
        HandlerError, TODO_DELETED, UPDATE_TODO_FAILED,
    },
    helper::read_form,
    server::AppState,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    routing::{get, put},
    Json, Router,
};
use entities::{Id, Todo};
use http::StatusCode;
use std::sync::Arc;
use tracing::instrument;

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", put(update_todo).delete(delete_todo))
}

#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Todo>>, HandlerError> {
    let todos = state.gateway.list().await.or_respond_with(FETCH_TODOS_FAILED)?;

    Ok(Json(todos))
}

#[instrument(skip(state, multipart))]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Todo>), HandlerError> {
    let form = read_form(multipart).await.or_respond_with(ADD_TODO_FAILED)?;
    let todo = state
        .gateway
        .create(form)
        .await
        .or_respond_with(ADD_TODO_FAILED)?;

    Ok((StatusCode::CREATED, Json(todo)))
}

#[instrument(skip(state, multipart))]
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Todo>, HandlerError> {
    let form = read_form(multipart)
        .await
        .or_respond_with(UPDATE_TODO_FAILED)?;
    let todo = state
        .gateway
        .update(&id, form)
        .await
        .or_respond_with(UPDATE_TODO_FAILED)?;

    Ok(Json(todo))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state
        .gateway
        .delete(&id)
        .await
        .or_respond_with(DELETE_TODO_FAILED)?;

    Ok(Json(MessageResponse {
        message: TODO_DELETED.to_string(),
    }))
}
