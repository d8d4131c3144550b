use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for replacing an account's fields (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password: self.password,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&current_user.user, UserId(user_id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
