use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

/// The account a request acts on behalf of, resolved from its bearer token.
///
/// Missing header, wrong scheme, bad token and unknown subject are all
/// rejected with the same 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::debug!("Missing or malformed Authorization header");
            ApiError::could_not_validate_credentials()
        })?;

        let user = state.user_service.resolve_principal(token).await?;

        Ok(Self {
            user,
            token: token.to_string(),
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
