use super::{AuthError, AuthService, Credentials, Session};
use crate::model::User;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<Session>,
}

/// Accounts kept in memory. Tokens are opaque counters.
#[derive(Debug, Default)]
pub struct InMemoryAuth {
    state: Mutex<State>,
    issued: AtomicU32,
}

impl InMemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers an account with a known user id.
    pub fn with_account(self, user: User, password: impl Into<String>) -> Self {
        self.state().accounts.insert(
            user.email.clone(),
            Account {
                user,
                password: password.into(),
            },
        );
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuthService for InMemoryAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let mut state = self.state();
        let account = state
            .accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .ok_or(AuthError::InvalidCredentials)?;
        let token = format!("token-{}", self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        let session = Session::new(account.user.clone(), token);
        state.current = Some(session.clone());
        info!(user_id = %session.user_id(), "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let mut state = self.state();
        if state.accounts.contains_key(credentials.email()) {
            return Err(AuthError::AlreadyRegistered(credentials.email().to_string()));
        }
        let user = User::new(
            format!("user-{}", state.accounts.len() + 1),
            credentials.email(),
        );
        state.accounts.insert(
            credentials.email().to_string(),
            Account {
                user: user.clone(),
                password: credentials.password().to_string(),
            },
        );
        info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let mut state = self.state();
        if state.current.as_ref() == Some(session) {
            state.current = None;
        }
        info!(user_id = %session.user_id(), "Signed out");
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.state().current.clone()
    }
}
