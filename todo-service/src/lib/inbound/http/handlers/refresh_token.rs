use axum::extract::State;
use axum::http::StatusCode;

use super::authenticate::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::router::AppState;

/// Re-issue the presented token with a fresh expiry.
///
/// The principal is resolved first, so tokens of deleted accounts are not
/// refreshed.
pub async fn refresh_token(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    state
        .user_service
        .refresh_token(&current_user.token)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}
