//! Account registration, login, balances and credentials.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::model::User;
use crate::repository::{RepositoryError, RepositoryHandle, UserRepository};

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Minimum display-name length, counted after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Caller-supplied text violates a precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// A money amount must be positive.
    #[error("Amount must be positive: {0}")]
    InvalidAmount(f64),

    /// A balance can never be set below zero.
    #[error("Balance cannot be negative: {0}")]
    NegativeBalance(f64),

    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same id already exists.
    #[error("User id already taken: {0}")]
    AlreadyExists(String),

    /// The supplied password does not match.
    #[error("Password does not match")]
    AuthenticationFailed,

    /// An underlying repository error occurred.
    #[error("User repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Business rules for accounts.
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Registers a new account with the fixed starting balance.
    #[instrument(skip(self, password, name))]
    pub async fn register(&self, id: &str, password: &str, name: &str) -> Result<User, UserError> {
        validate_registration(id, password, name)?;

        if self.users.exists_by_id(id.to_string()).await? {
            return Err(UserError::AlreadyExists(id.to_string()));
        }

        let user = self.users.insert(User::new(id, password, name.trim())).await?;
        info!(user_id = %user.id, "Registered new user");
        Ok(user)
    }

    /// Checks credentials and returns the account on success.
    #[instrument(skip(self, password))]
    pub async fn login(&self, id: &str, password: &str) -> Result<User, UserError> {
        if id.trim().is_empty() {
            return Err(UserError::InvalidInput("id must not be empty"));
        }
        if password.is_empty() {
            return Err(UserError::InvalidInput("password must not be empty"));
        }

        let user = self.find_user(id).await?;
        if !user.matches_password(password) {
            warn!(user_id = id, "Password mismatch");
            return Err(UserError::AuthenticationFailed);
        }

        info!(user_id = %user.id, "Login succeeded");
        Ok(user)
    }

    async fn find_user(&self, id: &str) -> Result<User, UserError> {
        self.users
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    pub async fn get_user(&self, id: &str) -> Result<User, UserError> {
        self.find_user(id).await
    }

    pub async fn balance_of(&self, id: &str) -> Result<f64, UserError> {
        Ok(self.find_user(id).await?.balance)
    }

    /// Sets the balance to an absolute value.
    #[instrument(skip(self))]
    pub async fn update_balance(&self, id: &str, new_balance: f64) -> Result<(), UserError> {
        if new_balance < 0.0 {
            return Err(UserError::NegativeBalance(new_balance));
        }

        let mut user = self.find_user(id).await?;
        let old_balance = user.balance;
        user.balance = new_balance;
        self.users.update(user).await?;

        info!(user_id = id, old_balance, new_balance, "Balance updated");
        Ok(())
    }

    /// Soft-fail debit: `Ok(false)` when funds are short or the user is
    /// missing, so callers wanting a boolean don't have to catch errors.
    #[instrument(skip(self))]
    pub async fn deduct_balance(&self, id: &str, amount: f64) -> Result<bool, UserError> {
        if amount <= 0.0 {
            return Err(UserError::InvalidAmount(amount));
        }

        let Some(mut user) = self.users.find_by_id(id.to_string()).await? else {
            return Ok(false);
        };
        if user.balance < amount {
            return Ok(false);
        }

        user.balance -= amount;
        self.users.update(user).await?;

        info!(user_id = id, amount, "Balance deducted");
        Ok(true)
    }

    /// Credits the account.
    #[instrument(skip(self))]
    pub async fn add_balance(&self, id: &str, amount: f64) -> Result<f64, UserError> {
        if amount <= 0.0 {
            return Err(UserError::InvalidAmount(amount));
        }

        let mut user = self.find_user(id).await?;
        user.balance += amount;
        let new_balance = user.balance;
        self.users.update(user).await?;

        info!(user_id = id, amount, new_balance, "Balance topped up");
        Ok(new_balance)
    }

    /// Replaces the password after checking the current one.
    #[instrument(skip(self, current, new))]
    pub async fn change_password(&self, id: &str, current: &str, new: &str) -> Result<(), UserError> {
        if current.is_empty() {
            return Err(UserError::InvalidInput("current password must not be empty"));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserError::InvalidInput(
                "new password must be at least 4 characters",
            ));
        }

        let mut user = self.find_user(id).await?;
        if !user.matches_password(current) {
            return Err(UserError::AuthenticationFailed);
        }

        user.password = new.to_string();
        self.users.update(user).await?;

        info!(user_id = id, "Password changed");
        Ok(())
    }
}

fn validate_registration(id: &str, password: &str, name: &str) -> Result<(), UserError> {
    if id.trim().is_empty() {
        return Err(UserError::InvalidInput("id must not be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserError::InvalidInput(
            "password must be at least 4 characters",
        ));
    }
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(UserError::InvalidInput("name must be at least 2 characters"));
    }
    Ok(())
}
