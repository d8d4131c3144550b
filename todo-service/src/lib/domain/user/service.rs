use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;

use crate::domain::access::authorize;
use crate::domain::access::Resource;
use crate::domain::page::Page;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Owns the account mutation flow and principal resolution; password hashing
/// and tokens are delegated to the shared [`Authenticator`].
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator.hash_password(password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            UserError::from(e)
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(command.username.to_string()));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(&command.password)?;

        let created_user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %created_user.id, "User created");
        Ok(created_user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        principal: &User,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        authorize(principal, id, Resource::Account)?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.username = command.username;
        user.email = command.email;
        user.password_hash = self.hash_password(&command.password)?;

        let updated_user = self.repository.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "User updated");
        Ok(updated_user)
    }

    async fn delete_user(&self, principal: &User, id: UserId) -> Result<(), UserError> {
        authorize(principal, id, Resource::Account)?;

        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticationResult, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))?;

        self.authenticator
            .authenticate(password, &user.password_hash, user.email.as_str())
            .map_err(|e| {
                match &e {
                    auth::AuthenticationError::InvalidCredentials => {
                        tracing::warn!(user_id = %user.id, "Rejected login attempt")
                    }
                    auth::AuthenticationError::PasswordError(err) => {
                        tracing::error!(user_id = %user.id, error = %err, "Stored password hash is unusable")
                    }
                    _ => tracing::error!(user_id = %user.id, error = %e, "Token issuance failed"),
                }
                UserError::from(e)
            })
    }

    async fn resolve_principal(&self, token: &str) -> Result<User, UserError> {
        let subject = self.authenticator.verify_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            UserError::CouldNotValidateCredentials
        })?;

        self.repository
            .find_by_email(&subject)
            .await?
            .ok_or(UserError::CouldNotValidateCredentials)
    }

    async fn refresh_token(&self, token: &str) -> Result<AuthenticationResult, UserError> {
        self.authenticator
            .refresh_token(token)
            .map_err(UserError::from)
    }
}
