use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::authorize;
use crate::domain::access::Resource;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::User;

/// Domain service implementation for to-do operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// Load `id` and check that `principal` owns it.
    async fn owned_todo(&self, principal: &User, id: TodoId) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;

        authorize(principal, todo.user_id, Resource::Todo).map_err(|e| {
            tracing::warn!(todo_id = %id, user_id = %principal.id, "Access to foreign to-do denied");
            TodoError::from(e)
        })?;

        Ok(todo)
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        principal: &User,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .create(NewTodo {
                title: command.title,
                description: command.description,
                state: command.state,
                user_id: principal.id,
            })
            .await?;

        tracing::info!(todo_id = %todo.id, user_id = %principal.id, "To-do created");
        Ok(todo)
    }

    async fn list_todos(
        &self,
        principal: &User,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_by_owner(principal.id, &filter).await
    }

    async fn update_todo(
        &self,
        principal: &User,
        id: TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.owned_todo(principal, id).await?;
        command.apply_to(&mut todo);
        self.repository.update(todo).await
    }

    async fn delete_todo(&self, principal: &User, id: TodoId) -> Result<(), TodoError> {
        self.owned_todo(principal, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(todo_id = %id, user_id = %principal.id, "To-do deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::access::AccessError;
    use crate::domain::page::Page;
    use crate::domain::todo::models::TodoState;
    use crate::domain::todo::models::TodoTitle;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;
            async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;
            async fn list_by_owner(&self, owner: UserId, filter: &TodoFilter) -> Result<Vec<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete(&self, id: TodoId) -> Result<(), TodoError>;
        }
    }

    fn principal(id: i64) -> User {
        User {
            id: UserId(id),
            username: Username::new(format!("user{}", id)).unwrap(),
            email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn todo(id: i64, owner: i64) -> Todo {
        Todo {
            id: TodoId(id),
            title: TodoTitle::new("Write tests".to_string()).unwrap(),
            description: "for the to-do service".to_string(),
            state: TodoState::Todo,
            user_id: UserId(owner),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_todo_is_owned_by_principal() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_create()
            .withf(|new_todo| new_todo.user_id == UserId(7) && new_todo.title.as_str() == "Write tests")
            .times(1)
            .returning(|new_todo| {
                Ok(Todo {
                    id: TodoId(1),
                    title: new_todo.title,
                    description: new_todo.description,
                    state: new_todo.state,
                    user_id: new_todo.user_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = TodoService::new(Arc::new(repository));

        let command = CreateTodoCommand {
            title: TodoTitle::new("Write tests".to_string()).unwrap(),
            description: String::new(),
            state: TodoState::Draft,
        };

        let created = service.create_todo(&principal(7), command).await.unwrap();
        assert_eq!(created.user_id, UserId(7));
        assert_eq!(created.state, TodoState::Draft);
    }

    #[tokio::test]
    async fn test_list_todos_is_scoped_to_principal() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_list_by_owner()
            .withf(|owner, filter| *owner == UserId(3) && filter.page == Page::default())
            .times(1)
            .returning(|_, _| Ok(vec![todo(1, 3)]));

        let service = TodoService::new(Arc::new(repository));

        let todos = service
            .list_todos(&principal(3), TodoFilter::default())
            .await
            .unwrap();
        assert_eq!(todos.len(), 1);
    }

    #[tokio::test]
    async fn test_update_todo_applies_provided_fields() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(todo(id.0, 1))));
        repository
            .expect_update()
            .withf(|todo| todo.state == TodoState::Done && todo.title.as_str() == "Write tests")
            .times(1)
            .returning(Ok);

        let service = TodoService::new(Arc::new(repository));

        let command = UpdateTodoCommand {
            state: Some(TodoState::Done),
            ..UpdateTodoCommand::default()
        };

        let updated = service
            .update_todo(&principal(1), TodoId(5), command)
            .await
            .unwrap();
        assert_eq!(updated.state, TodoState::Done);
    }

    #[tokio::test]
    async fn test_update_foreign_todo_is_forbidden() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .returning(|id| Ok(Some(todo(id.0, 2))));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository));

        let err = service
            .update_todo(&principal(1), TodoId(5), UpdateTodoCommand::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TodoError::Forbidden(AccessError::Forbidden(Resource::Todo))
        ));
        assert_eq!(err.to_string(), "Not enough permissions");
    }

    #[tokio::test]
    async fn test_update_missing_todo() {
        let mut repository = MockTestTodoRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = TodoService::new(Arc::new(repository));

        let err = service
            .update_todo(&principal(1), TodoId(10), UpdateTodoCommand::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Task with id 10 not found");
    }

    #[tokio::test]
    async fn test_delete_todo_success() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .returning(|id| Ok(Some(todo(id.0, 1))));
        repository
            .expect_delete()
            .withf(|id| *id == TodoId(5))
            .times(1)
            .returning(|_| Ok(()));

        let service = TodoService::new(Arc::new(repository));

        assert!(service.delete_todo(&principal(1), TodoId(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_foreign_todo_is_forbidden() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .returning(|id| Ok(Some(todo(id.0, 2))));
        repository.expect_delete().times(0);

        let service = TodoService::new(Arc::new(repository));

        let err = service
            .delete_todo(&principal(1), TodoId(5))
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Forbidden(_)));
    }
}
