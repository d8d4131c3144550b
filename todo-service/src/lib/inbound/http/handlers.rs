use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod create_todo;
pub mod create_user;
pub mod delete_todo;
pub mod delete_user;
pub mod get_user;
pub mod list_todos;
pub mod list_users;
pub mod refresh_token;
pub mod root;
pub mod update_todo;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    /// Rendered with `WWW-Authenticate: Bearer`
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn could_not_validate_credentials() -> Self {
        Self::from(UserError::CouldNotValidateCredentials)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::AccountConflict => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials | UserError::CouldNotValidateCredentials => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) | UserError::InvalidPage(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            TodoError::InvalidTitle(_) | TodoError::InvalidState(_) | TodoError::InvalidPage(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            TodoError::DatabaseError(_) => {
                tracing::error!(error = %err, "To-do operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<MessageData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: MessageData { message },
        }
    }
}

/// Bare `{"message": ...}` payload used by errors and confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account; the password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.0,
            title: todo.title.as_str().to_string(),
            description: todo.description.clone(),
            state: todo.state.as_str(),
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::AccessError;
    use crate::domain::access::Resource;
    use crate::domain::todo::models::TodoId;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_user_error_status_mapping() {
        let cases = [
            (UserError::NotFound(UserId(1)), StatusCode::NOT_FOUND),
            (
                UserError::NotFoundByEmail("a@example.com".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::UsernameAlreadyExists("alice".to_string()),
                StatusCode::CONFLICT,
            ),
            (UserError::AccountConflict, StatusCode::CONFLICT),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::CouldNotValidateCredentials, StatusCode::UNAUTHORIZED),
            (
                UserError::Forbidden(AccessError::Forbidden(Resource::Account)),
                StatusCode::FORBIDDEN,
            ),
            (
                UserError::DatabaseError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_todo_error_status_mapping() {
        assert_eq!(
            ApiError::from(TodoError::NotFound(TodoId(3))),
            ApiError::NotFound("Task with id 3 not found".to_string())
        );
        assert_eq!(
            ApiError::from(TodoError::Forbidden(AccessError::Forbidden(Resource::Todo))),
            ApiError::Forbidden("Not enough permissions".to_string())
        );
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = ApiError::could_not_validate_credentials().into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_other_errors_have_no_challenge() {
        let response = ApiError::Forbidden("Not enough permissions".to_string()).into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
