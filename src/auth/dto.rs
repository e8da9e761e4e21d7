use serde::{Deserialize, Serialize};

/// Request body for the identity exchange.
#[derive(Debug, Serialize)]
pub struct ExchangeRequest<'a> {
    pub token: &'a str, // third-party identity credential
}

/// Response of `/auth/google/{user,mentor}`.
#[derive(Debug, Deserialize)]
pub struct ExchangeResponse {
    pub token: String,
    pub user: BackendUser,
}

/// User record as the backend reports it. It carries no role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub is_mentor: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
