use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(todo_id): Path<i64>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .todo_service
        .delete_todo(&current_user.user, TodoId(todo_id))
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Task has been deleted successfully."),
            )
        })
}
