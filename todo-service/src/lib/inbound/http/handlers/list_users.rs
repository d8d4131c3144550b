use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::page::Page;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    let page = params.try_into_page().map_err(UserError::from)?;

    state
        .user_service
        .list_users(page)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                ListUsersResponseData {
                    users: users.iter().map(UserData::from).collect(),
                },
            )
        })
}

/// `offset`/`limit` query parameters shared by listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn try_into_page(self) -> Result<Page, crate::domain::page::PageError> {
        Page::new(self.offset, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub users: Vec<UserData>,
}
