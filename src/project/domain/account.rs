//! User accounts as seen from the project service.

use super::{ParseAccountRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account-level role held in the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    /// Administrator; bypasses project-level role checks.
    Admin,
    /// Regular account.
    User,
}

impl AccountRole {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AccountRole {
    type Error = ParseAccountRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            _ => Err(ParseAccountRoleError(value.to_owned())),
        }
    }
}

/// Snapshot of a user account returned by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    id: UserId,
    username: String,
    role: AccountRole,
}

impl UserAccount {
    /// Creates an account snapshot.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, role: AccountRole) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> AccountRole {
        self.role
    }

    /// Returns `true` for administrator accounts.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, AccountRole::Admin)
    }
}
