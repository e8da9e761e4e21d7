use serde::{Deserialize, Serialize};
use std::fmt;

use super::dto::BackendUser;
use crate::navigation::Navigation;

/// Role chosen by the login flow the user went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
}

impl Role {
    /// Backend path that exchanges an identity credential for a session.
    pub fn exchange_path(self) -> &'static str {
        match self {
            Role::Student => "/auth/google/user",
            Role::Mentor => "/auth/google/mentor",
        }
    }

    pub fn dashboard(self) -> Navigation {
        match self {
            Role::Student => Navigation::StudentDashboard,
            Role::Mentor => Navigation::MentorDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Mentor => f.write_str("mentor"),
        }
    }
}

/// Normalized user record kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mentor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl AuthUser {
    pub fn from_backend(user: BackendUser, role: Role) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role,
            image: user.image,
            is_mentor: user.is_mentor,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Bearer token plus user; both present means "logged in".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}
