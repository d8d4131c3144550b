use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    state
        .todo_service
        .create_todo(&current_user.user, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

/// HTTP request body for creating a to-do (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: String,
    state: String,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        Ok(CreateTodoCommand {
            title: TodoTitle::new(self.title)?,
            description: self.description,
            state: self.state.parse()?,
        })
    }
}
