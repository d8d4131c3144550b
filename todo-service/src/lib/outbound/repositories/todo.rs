use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    state: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId(row.id),
            title: TodoTitle::new(row.title)?,
            description: row.description,
            state: row.state.parse()?,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `ILIKE` pattern matching `search` as a literal substring.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn database_error(err: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(err.to_string())
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, description, state, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, state, user_id, created_at, updated_at
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.state.as_str())
        .bind(todo.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?
        .try_into()
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, state, user_id, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Todo::try_from)
        .transpose()
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        filter: &TodoFilter,
    ) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, state, user_id, created_at, updated_at
            FROM todos
            WHERE user_id = $1
              AND ($2::TEXT IS NULL
                   OR title ILIKE $2 ESCAPE '\'
                   OR description ILIKE $2 ESCAPE '\')
              AND ($3::TEXT IS NULL OR state = $3)
            ORDER BY id
            OFFSET $4
            LIMIT $5
            "#,
        )
        .bind(owner.0)
        .bind(filter.search.as_deref().map(contains_pattern))
        .bind(filter.state.map(|state| state.as_str()))
        .bind(filter.page.offset())
        .bind(filter.page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = $2, description = $3, state = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, state, user_id, created_at, updated_at
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.state.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(TodoError::NotFound(todo.id))?
        .try_into()
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id));
        }

        Ok(())
    }
}
