//! Signup and login.

use std::sync::Arc;

use crate::domain::{NewAccount, User};
use crate::error::{DomainError, RepoError, ValidationErrors};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// An authenticated user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account and log it in.
    pub async fn signup(&self, input: NewAccount) -> Result<Session, DomainError> {
        let mut errors = input.validate();
        let username_ok = errors.field("username").is_none();
        if let Some(username) = input.username.as_deref().filter(|_| username_ok) {
            if self.users.find_by_username(username).await?.is_some() {
                errors.add("username", USERNAME_TAKEN);
            }
        }
        errors.into_result()?;

        let NewAccount {
            username,
            email,
            password,
        } = input;
        let password_hash = self
            .passwords
            .hash(password.as_deref().unwrap_or_default())
            .map_err(internal)?;
        let user = User::new(
            username.unwrap_or_default(),
            email.unwrap_or_default(),
            password_hash,
        );

        let user = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("username", USERNAME_TAKEN);
                DomainError::Validation(errors)
            }
            other => other.into(),
        })?;
        tracing::info!(user_id = %user.id, email = %user.masked_email(), "User signed up");

        self.session_for(user)
    }

    /// Exchange a username and password for a token.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Session, DomainError> {
        let (Some(username), Some(password)) = (
            username.filter(|u| !u.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(DomainError::MissingCredentials);
        };

        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!("Login attempt for unknown username");
            return Err(DomainError::InvalidCredentials);
        };

        if !self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(internal)?
        {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        self.session_for(user)
    }

    fn session_for(&self, user: User) -> Result<Session, DomainError> {
        let token = self
            .tokens
            .generate_token(user.id, &user.username)
            .map_err(internal)?;
        Ok(Session {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }
}

fn internal(err: AuthError) -> DomainError {
    DomainError::Internal(err.to_string())
}
