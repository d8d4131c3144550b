use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateUserCommand::new(username, email, self.password))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
