//! In-memory user directory standing in for the user service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{UserAccount, UserId},
    ports::UserDirectory,
};
use crate::remote::{RemoteError, RemoteResult, USER_SERVICE};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Call`] when the directory lock is poisoned.
    pub fn insert(&self, account: UserAccount) -> RemoteResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|err| RemoteError::call(USER_SERVICE, std::io::Error::other(err.to_string())))?;
        accounts.insert(account.id(), account);
        Ok(())
    }

    /// Removes an account, returning it if present.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Call`] when the directory lock is poisoned.
    pub fn remove(&self, user_id: UserId) -> RemoteResult<Option<UserAccount>> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|err| RemoteError::call(USER_SERVICE, std::io::Error::other(err.to_string())))?;
        Ok(accounts.remove(&user_id))
    }

    fn lookup(&self, user_id: UserId) -> RemoteResult<Option<UserAccount>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| RemoteError::call(USER_SERVICE, std::io::Error::other(err.to_string())))?;
        Ok(accounts.get(&user_id).cloned())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn user_exists(&self, user_id: UserId) -> RemoteResult<bool> {
        Ok(self.lookup(user_id)?.is_some())
    }

    async fn is_admin(&self, user_id: UserId) -> RemoteResult<bool> {
        Ok(self
            .lookup(user_id)?
            .is_some_and(|account| account.is_admin()))
    }

    async fn find_user(&self, user_id: UserId) -> RemoteResult<Option<UserAccount>> {
        self.lookup(user_id)
    }
}
