#![allow(dead_code)]

pub mod postgres;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Clock;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use todo_service::domain::page::Page;
use todo_service::domain::todo::errors::TodoError;
use todo_service::domain::todo::models::NewTodo;
use todo_service::domain::todo::models::Todo;
use todo_service::domain::todo::models::TodoFilter;
use todo_service::domain::todo::models::TodoId;
use todo_service::domain::todo::ports::TodoRepository;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::errors::UserError;
use todo_service::domain::user::models::NewUser;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::models::Username;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<TestClock>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(TestClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_clock(
            JWT_SECRET,
            Duration::minutes(TOKEN_TTL_MINUTES),
            clock.clone(),
        ));

        let database = Arc::new(InMemoryDatabase::default());
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new(database.clone())),
            authenticator.clone(),
        ));
        let todo_service = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new(
            database,
        ))));

        let router = create_router(user_service, todo_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the `data` object of the response.
    pub async fn create_user(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/auth/token")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Register `username` with a fixed password and log in as it.
    ///
    /// Returns the account id and its token.
    pub async fn signed_up(&self, username: &str) -> (i64, String) {
        let email = format!("{}@example.com", username);
        let user = self.create_user(username, &email, "pass_word!").await;
        let token = self.login(&email, "pass_word!").await;
        (user["id"].as_i64().expect("Missing user id"), token)
    }
}

/// Clock moved by hand from tests.
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Both tables behind one lock set, so deleting a user cascades to its to-dos.
#[derive(Default)]
pub struct InMemoryDatabase {
    users: Mutex<Table<User>>,
    todos: Mutex<Table<Todo>>,
}

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub struct InMemoryUserRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryUserRepository {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.database.users.lock().unwrap();

        if users.rows.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId(users.next_id()),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.rows.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self.database.users.lock().unwrap().rows.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.database.users.lock().unwrap();
        Ok(users.rows.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.database.users.lock().unwrap();
        Ok(users
            .rows
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        let users = self.database.users.lock().unwrap();
        Ok(page.slice(users.rows.values().cloned()))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.database.users.lock().unwrap();

        let collides = users.rows.values().any(|other| {
            other.id != user.id && (other.username == user.username || other.email == user.email)
        });
        if collides {
            return Err(UserError::AccountConflict);
        }

        let stored = users
            .rows
            .get_mut(&user.id.0)
            .ok_or(UserError::NotFound(user.id))?;
        stored.username = user.username;
        stored.email = user.email;
        stored.password_hash = user.password_hash;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let mut users = self.database.users.lock().unwrap();
        users.rows.remove(&id.0).ok_or(UserError::NotFound(id))?;

        self.database
            .todos
            .lock()
            .unwrap()
            .rows
            .retain(|_, todo| todo.user_id != id);

        Ok(())
    }
}

pub struct InMemoryTodoRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryTodoRepository {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut todos = self.database.todos.lock().unwrap();

        let now = Utc::now();
        let created = Todo {
            id: TodoId(todos.next_id()),
            title: todo.title,
            description: todo.description,
            state: todo.state,
            user_id: todo.user_id,
            created_at: now,
            updated_at: now,
        };
        todos.rows.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.database.todos.lock().unwrap().rows.get(&id.0).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        filter: &TodoFilter,
    ) -> Result<Vec<Todo>, TodoError> {
        let todos = self.database.todos.lock().unwrap();
        Ok(filter.page.slice(
            todos
                .rows
                .values()
                .filter(|todo| todo.user_id == owner && filter.matches(todo))
                .cloned(),
        ))
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.database.todos.lock().unwrap();

        let stored = todos
            .rows
            .get_mut(&todo.id.0)
            .ok_or(TodoError::NotFound(todo.id))?;
        stored.title = todo.title;
        stored.description = todo.description;
        stored.state = todo.state;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoError> {
        let mut todos = self.database.todos.lock().unwrap();
        todos.rows.remove(&id.0).ok_or(TodoError::NotFound(id))?;
        Ok(())
    }
}
