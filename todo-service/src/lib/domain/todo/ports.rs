use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for to-do domain service operations.
///
/// Every operation acts on behalf of an already resolved principal.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a to-do owned by `principal`.
    async fn create_todo(&self, principal: &User, command: CreateTodoCommand)
        -> Result<Todo, TodoError>;

    /// List `principal`'s to-dos matching `filter`, ordered by id.
    async fn list_todos(&self, principal: &User, filter: TodoFilter)
        -> Result<Vec<Todo>, TodoError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - To-do does not exist
    /// * `Forbidden` - To-do belongs to another account
    async fn update_todo(
        &self,
        principal: &User,
        id: TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - To-do does not exist
    /// * `Forbidden` - To-do belongs to another account
    async fn delete_todo(&self, principal: &User, id: TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for to-do aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    /// To-dos of `owner` matching `filter`, ordered by id, windowed by
    /// `filter.page`.
    async fn list_by_owner(&self, owner: UserId, filter: &TodoFilter)
        -> Result<Vec<Todo>, TodoError>;

    /// Persist title, description and state, refreshing `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - To-do does not exist
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - To-do does not exist
    async fn delete(&self, id: TodoId) -> Result<(), TodoError>;
}
