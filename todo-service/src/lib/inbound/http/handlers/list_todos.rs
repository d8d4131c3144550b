use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::page::Page;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoState;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_todos(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<ListTodosParams>,
) -> Result<ApiSuccess<ListTodosResponseData>, ApiError> {
    let filter = params.try_into_filter()?;

    state
        .todo_service
        .list_todos(&current_user.user, filter)
        .await
        .map_err(ApiError::from)
        .map(|todos| {
            ApiSuccess::new(
                StatusCode::OK,
                ListTodosResponseData {
                    todos: todos.iter().map(TodoData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosParams {
    pub search: Option<String>,
    pub state: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListTodosParams {
    fn try_into_filter(self) -> Result<TodoFilter, TodoError> {
        Ok(TodoFilter {
            search: self.search.filter(|search| !search.is_empty()),
            state: self.state.as_deref().map(str::parse::<TodoState>).transpose()?,
            page: Page::new(self.offset, self.limit)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListTodosResponseData {
    pub todos: Vec<TodoData>,
}
