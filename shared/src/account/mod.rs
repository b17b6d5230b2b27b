pub mod handle;

use serde::{Deserialize, Serialize};

use crate::{Id, Record};

/// Represents roles an account can have.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The top role, manages every other account.
    Admin,
    /// Reviews verifications, fees and reports on behalf of admins.
    Subadmin,
    /// Lists hostels once verified.
    Manager,
    Student,
}

impl Role {
    /// Whether this role reviews submissions from managers and students.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Subadmin)
    }
}

/// Represents an account as the server reports it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_terminated: bool,
    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn is_active(&self) -> bool {
        !self.is_terminated
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}
