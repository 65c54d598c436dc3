use crate::shared::entity::{Entity, ID};
use chrono::prelude::*;
use thiserror::Error;

pub const USERNAME_MAX_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub username: String,
    /// Always stored trimmed and lowercased
    pub email: String,
    /// Secret used by clients in the `Authorization` header
    pub api_token: String,
    pub created: DateTime<Utc>,
}

#[derive(Error, Debug, PartialEq)]
pub enum UserValidationError {
    #[error("Username must be between 1 and {0} characters")]
    InvalidUsername(usize),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl User {
    pub fn new(
        username: &str,
        email: &str,
        api_token: String,
    ) -> Result<Self, UserValidationError> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
            return Err(UserValidationError::InvalidUsername(USERNAME_MAX_LEN));
        }
        let email = Self::normalize_email(email);
        if !Self::is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail(email));
        }

        Ok(Self {
            id: Default::default(),
            username: username.to_string(),
            email,
            api_token,
            created: Utc::now(),
        })
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn is_valid_email(email: &str) -> bool {
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && domain.contains('.')
                    && !email.chars().any(char::is_whitespace)
                    && !domain.contains('@')
            }
            None => false,
        }
    }
}
