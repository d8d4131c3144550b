use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken (checked first)
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// List accounts ordered by id within `page`.
    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError>;

    /// Replace username, email and password of `id` on behalf of `principal`.
    ///
    /// # Errors
    /// * `Forbidden` - `principal` does not own the account
    /// * `AccountConflict` - New username or email belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        principal: &User,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Delete account `id` on behalf of `principal`.
    ///
    /// # Errors
    /// * `Forbidden` - `principal` does not own the account
    /// * `NotFound` - User does not exist
    async fn delete_user(&self, principal: &User, id: UserId) -> Result<(), UserError>;

    /// Exchange email and password for a bearer token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<auth::AuthenticationResult, UserError>;

    /// Resolve the account a bearer token belongs to.
    ///
    /// # Errors
    /// * `CouldNotValidateCredentials` - For every failure, including an
    ///   unknown subject
    async fn resolve_principal(&self, token: &str) -> Result<User, UserError>;

    /// Issue a fresh token for the subject of a still-valid `token`.
    ///
    /// # Errors
    /// * `CouldNotValidateCredentials` - Token is invalid or expired
    async fn refresh_token(&self, token: &str) -> Result<auth::AuthenticationResult, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new account and return it with its assigned id and timestamps.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username unique constraint violated
    /// * `EmailAlreadyExists` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError>;

    /// Persist username, email and password hash of `user`, refreshing
    /// `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `AccountConflict` - Username or email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: UserId) -> Result<(), UserError>;
}
