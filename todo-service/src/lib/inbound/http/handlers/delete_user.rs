use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::models::UserId;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .user_service
        .delete_user(&current_user.user, UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("User deleted")))
}
