//! # Authentication
//!
//! Email/password accounts behind the [`AuthService`] trait. A successful sign-in yields a
//! [`Session`], which is passed by reference to whatever needs the signed-in user; there is no
//! global "current user".
//!
//! - [`InMemoryAuth`] keeps accounts in memory, for tests and the demo binary.
//! - [`RestAuth`] talks to a GoTrue-style endpoint (`/auth/v1/...`).

pub mod memory;
pub mod rest;

pub use memory::*;
pub use rest::*;

use crate::model::{User, UserId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Please fill in both fields")]
    MissingFields,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    /// The identity provider refused the request for another reason.
    #[error("auth request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("auth request failed: {0}")]
    Transport(String),

    #[error("could not decode auth response: {0}")]
    Decode(String),
}

/// Validated sign-in or sign-up input.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Rejects a blank email or an empty password. The email is trimmed; the password is not.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, AuthError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A signed-in user and the token that proves it.
#[derive(Clone, PartialEq)]
pub struct Session {
    user: User,
    access_token: String,
}

impl Session {
    pub fn new(user: User, access_token: impl Into<String>) -> Self {
        Self {
            user,
            access_token: access_token.into(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Identity provider seam.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in and remembers the session as current.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Registers a new account. The user signs in afterwards.
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Ends `session` and forgets it if it is the current one.
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;

    /// The most recent session that has not been signed out.
    fn current_session(&self) -> Option<Session>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_rejected() {
        assert_eq!(Credentials::new("", "secret"), Err(AuthError::MissingFields));
        assert_eq!(Credentials::new("   ", "secret"), Err(AuthError::MissingFields));
        assert_eq!(Credentials::new("a@b.pk", ""), Err(AuthError::MissingFields));
        let ok = Credentials::new(" a@b.pk ", "secret").unwrap();
        assert_eq!(ok.email(), "a@b.pk");
    }

    #[test]
    fn test_secrets_stay_out_of_debug() {
        let credentials = Credentials::new("a@b.pk", "hunter22").unwrap();
        assert!(!format!("{credentials:?}").contains("hunter22"));

        let session = Session::new(User::new("u1", "a@b.pk"), "jwt-token");
        assert!(!format!("{session:?}").contains("jwt-token"));
        assert_eq!(session.user_id(), &UserId::from("u1"));
    }
}
