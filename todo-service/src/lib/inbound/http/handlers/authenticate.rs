use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .user_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<auth::AuthenticationResult> for TokenResponseData {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type,
        }
    }
}
