use tracing::{debug, warn};

use super::{Role, Session};
use crate::{navigation::Navigation, session::SessionStore};

/// Gate for a role's dashboard: the stored session must exist and match the role.
pub fn require_session(store: &SessionStore, role: Role) -> Result<Session, Navigation> {
    match store.session() {
        Some(session) if session.user.role == role => Ok(session),
        Some(session) => {
            debug!(stored = %session.user.role, wanted = %role, "role mismatch");
            Err(Navigation::Login)
        }
        None => Err(Navigation::Login),
    }
}

/// On the login page: skip the form when a complete session already exists.
/// A token without a readable user never redirects.
pub fn redirect_if_authenticated(store: &SessionStore) -> Option<Navigation> {
    store.session().map(|s| s.user.role.dashboard())
}

pub fn logout(store: &SessionStore) -> Navigation {
    if let Err(e) = store.clear_auth() {
        warn!(error = %e, "failed to clear session on logout");
    }
    Navigation::Login
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use crate::session::{MemoryStorage, Storage, TOKEN_KEY};
    use std::sync::Arc;

    fn store_with(role: Role) -> SessionStore {
        let store = SessionStore::in_memory();
        store
            .save_auth(&Session {
                token: "t".into(),
                user: AuthUser {
                    id: "1".into(),
                    email: "a@b.c".into(),
                    name: "A".into(),
                    role,
                    image: None,
                    is_mentor: None,
                    created_at: None,
                    updated_at: None,
                },
            })
            .unwrap();
        store
    }

    #[test]
    fn matching_role_passes() {
        let store = store_with(Role::Student);
        assert!(require_session(&store, Role::Student).is_ok());
    }

    #[test]
    fn other_role_goes_to_login() {
        let store = store_with(Role::Student);
        assert_eq!(
            require_session(&store, Role::Mentor).unwrap_err(),
            Navigation::Login
        );
    }

    #[test]
    fn empty_store_goes_to_login() {
        let store = SessionStore::in_memory();
        assert_eq!(
            require_session(&store, Role::Student).unwrap_err(),
            Navigation::Login
        );
    }

    #[test]
    fn redirect_follows_stored_role() {
        assert_eq!(
            redirect_if_authenticated(&store_with(Role::Mentor)),
            Some(Navigation::MentorDashboard)
        );
    }

    #[test]
    fn token_without_user_does_not_redirect() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_KEY, "t").unwrap();
        assert_eq!(redirect_if_authenticated(&SessionStore::new(storage)), None);
    }

    #[test]
    fn logout_clears_and_navigates() {
        let store = store_with(Role::Mentor);
        assert_eq!(logout(&store), Navigation::Login);
        assert!(store.session().is_none());
    }
}
