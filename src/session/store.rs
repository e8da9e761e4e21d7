use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::{MemoryStorage, Storage};
use crate::auth::{AuthUser, Session};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("session serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the current session. Cloning shares the same storage, so one
/// store is created at start-up and passed to every component that needs it.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Replaces any prior session wholesale.
    pub fn save_auth(&self, session: &Session) -> Result<(), SessionError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(USER_KEY, &user)?;
        debug!(user_id = %session.user.id, role = %session.user.role, "session saved");
        Ok(())
    }

    pub fn clear_auth(&self) -> Result<(), SessionError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        debug!("session cleared");
        Ok(())
    }

    pub fn auth_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// A malformed record means "no session", never an error.
    pub fn auth_user(&self) -> Option<AuthUser> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user record is malformed");
                None
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        let token = self.auth_token()?;
        let user = self.auth_user()?;
        Some(Session { token, user })
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.auth_token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn session(role: Role) -> Session {
        Session {
            token: "tok-1".into(),
            user: AuthUser {
                id: "u1".into(),
                email: "ada@example.com".into(),
                name: "Ada".into(),
                role,
                image: None,
                is_mentor: Some(role == Role::Mentor),
                created_at: None,
                updated_at: None,
            },
        }
    }

    #[test]
    fn save_then_read_back() {
        let store = SessionStore::in_memory();
        store.save_auth(&session(Role::Mentor)).unwrap();

        assert_eq!(store.auth_token().as_deref(), Some("tok-1"));
        let user = store.auth_user().unwrap();
        assert_eq!(user.role, Role::Mentor);
        assert_eq!(store.session().unwrap().user.email, "ada@example.com");
    }

    #[test]
    fn save_overwrites_previous_session() {
        let store = SessionStore::in_memory();
        store.save_auth(&session(Role::Mentor)).unwrap();
        let mut next = session(Role::Student);
        next.token = "tok-2".into();
        store.save_auth(&next).unwrap();

        assert_eq!(store.auth_token().as_deref(), Some("tok-2"));
        assert_eq!(store.auth_user().unwrap().role, Role::Student);
    }

    #[test]
    fn clear_on_empty_store_is_fine() {
        let store = SessionStore::in_memory();
        store.clear_auth().unwrap();
        store.clear_auth().unwrap();
        assert!(store.auth_token().is_none());
        assert!(store.auth_user().is_none());
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = SessionStore::in_memory();
        store.save_auth(&session(Role::Student)).unwrap();
        store.clear_auth().unwrap();
        assert!(store.session().is_none());
    }

    #[test]
    fn malformed_user_is_no_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_KEY, "tok").unwrap();
        storage.set_item(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(storage);

        assert!(store.auth_user().is_none());
        assert!(store.session().is_none());
        assert_eq!(store.auth_token().as_deref(), Some("tok"));
    }

    #[test]
    fn user_with_unknown_role_is_no_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_item(
                USER_KEY,
                r#"{"id":"1","email":"a@b.c","name":"A","role":"admin"}"#,
            )
            .unwrap();
        assert!(SessionStore::new(storage).auth_user().is_none());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.save_auth(&session(Role::Student)).unwrap();
        assert!(other.session().is_some());
    }
}
