use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoState;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoData;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial to-do update; absent fields are kept.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        Ok(UpdateTodoCommand {
            title: self.title.map(TodoTitle::new).transpose()?,
            description: self.description,
            state: self.state.as_deref().map(str::parse::<TodoState>).transpose()?,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(todo_id): Path<i64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .todo_service
        .update_todo(&current_user.user, TodoId(todo_id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
