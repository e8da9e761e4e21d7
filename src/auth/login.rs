use thiserror::Error;
use tracing::{info, instrument, warn};

use super::{
    dto::{ExchangeRequest, ExchangeResponse},
    AuthUser, Role, Session,
};
use crate::{
    client::{ClientError, PortalClient},
    navigation::{Navigation, Notice},
};

pub const NOT_MENTOR_MESSAGE: &str = "This account is not registered as a mentor.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const PROVIDER_FAILED_MESSAGE: &str = "Google login failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The identity provider returned no credential.
    MissingCredential,
    /// The identity provider itself reported an error.
    Provider,
    /// Mentor flow only: 403 from the backend, or `isMentor` not true.
    NotMentor,
    /// The backend exchange failed for any other reason.
    Exchange,
    /// The exchange succeeded but the session could not be persisted.
    Storage,
}

/// Why a login attempt ended without a session. `message` is the inline form
/// error, `notice` the toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoginRejection {
    pub kind: RejectionKind,
    pub message: String,
    pub notice: Notice,
}

impl LoginRejection {
    fn not_mentor() -> Self {
        Self {
            kind: RejectionKind::NotMentor,
            message: NOT_MENTOR_MESSAGE.into(),
            notice: Notice::error(NOT_MENTOR_MESSAGE.trim_end_matches('.')),
        }
    }

    fn generic(kind: RejectionKind, role: Role) -> Self {
        Self {
            kind,
            message: LOGIN_FAILED_MESSAGE.into(),
            notice: Notice::error(failed_notice(role)),
        }
    }

    fn from_client(err: &ClientError, role: Role) -> Self {
        match (role, err) {
            (Role::Mentor, ClientError::Forbidden { .. }) => Self::not_mentor(),
            (Role::Mentor, _) => {
                let server = err.server_message().map(str::to_string);
                Self {
                    kind: RejectionKind::Exchange,
                    message: server.clone().unwrap_or_else(|| LOGIN_FAILED_MESSAGE.into()),
                    notice: Notice::error(server.unwrap_or_else(|| failed_notice(role).into())),
                }
            }
            (Role::Student, _) => Self::generic(RejectionKind::Exchange, role),
        }
    }
}

fn failed_notice(role: Role) -> &'static str {
    match role {
        Role::Student => "Student login failed",
        Role::Mentor => "Mentor login failed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Submitting,
    Authenticated(AuthUser),
    Rejected(LoginRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub user: AuthUser,
    pub navigation: Navigation,
    pub notice: Notice,
}

/// One login form: exchanges an identity credential for a backend session.
pub struct LoginFlow {
    role: Role,
    client: PortalClient,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(role: Role, client: PortalClient) -> Self {
        Self {
            role,
            client,
            state: LoginState::Idle,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Inline error of the last rejected attempt, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoginState::Rejected(r) => Some(&r.message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == LoginState::Submitting
    }

    /// The identity provider failed before handing over a credential.
    pub fn provider_failed(&mut self) -> LoginRejection {
        let rejection = LoginRejection {
            kind: RejectionKind::Provider,
            message: PROVIDER_FAILED_MESSAGE.into(),
            notice: Notice::error(PROVIDER_FAILED_MESSAGE),
        };
        self.state = LoginState::Rejected(rejection.clone());
        rejection
    }

    /// Runs one attempt. A rejected flow can be submitted again.
    #[instrument(skip(self, credential), fields(role = %self.role))]
    pub async fn submit(
        &mut self,
        credential: Option<&str>,
    ) -> Result<LoginSuccess, LoginRejection> {
        self.state = LoginState::Submitting;
        let outcome = self.exchange(credential).await;
        self.state = match &outcome {
            Ok(success) => LoginState::Authenticated(success.user.clone()),
            Err(rejection) => LoginState::Rejected(rejection.clone()),
        };
        outcome
    }

    async fn exchange(&self, credential: Option<&str>) -> Result<LoginSuccess, LoginRejection> {
        let Some(credential) = credential.filter(|c| !c.is_empty()) else {
            warn!("missing identity credential");
            return Err(LoginRejection::generic(
                RejectionKind::MissingCredential,
                self.role,
            ));
        };

        let response: ExchangeResponse = self
            .client
            .post(self.role.exchange_path(), &ExchangeRequest { token: credential })
            .await
            .map_err(|e| {
                warn!(error = %e, "identity exchange failed");
                LoginRejection::from_client(&e, self.role)
            })?;

        // Mentor gate: the backend issued a token, but only confirmed mentors keep it.
        if self.role == Role::Mentor && response.user.is_mentor != Some(true) {
            warn!(user_id = %response.user.id, "account is not a mentor; session discarded");
            return Err(LoginRejection::not_mentor());
        }

        let session = Session {
            token: response.token,
            user: AuthUser::from_backend(response.user, self.role),
        };
        self.client.session().save_auth(&session).map_err(|e| {
            warn!(error = %e, "failed to persist session");
            LoginRejection::generic(RejectionKind::Storage, self.role)
        })?;

        info!(user_id = %session.user.id, "logged in");
        Ok(LoginSuccess {
            navigation: self.role.dashboard(),
            notice: Notice::success(format!("Logged in as {}", self.role)),
            user: session.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentor_forbidden_is_not_mentor() {
        let err = ClientError::Forbidden {
            message: Some("nope".into()),
        };
        let r = LoginRejection::from_client(&err, Role::Mentor);
        assert_eq!(r.kind, RejectionKind::NotMentor);
        assert_eq!(r.message, NOT_MENTOR_MESSAGE);
    }

    #[test]
    fn mentor_failure_prefers_server_message() {
        let err = ClientError::Status {
            status: 500,
            message: Some("backend down".into()),
        };
        let r = LoginRejection::from_client(&err, Role::Mentor);
        assert_eq!(r.kind, RejectionKind::Exchange);
        assert_eq!(r.message, "backend down");
        assert_eq!(r.notice, Notice::error("backend down"));
    }

    #[test]
    fn mentor_failure_without_message_is_generic() {
        let err = ClientError::Status {
            status: 500,
            message: None,
        };
        let r = LoginRejection::from_client(&err, Role::Mentor);
        assert_eq!(r.message, LOGIN_FAILED_MESSAGE);
        assert_eq!(r.notice, Notice::error("Mentor login failed"));
    }

    #[test]
    fn student_forbidden_is_generic() {
        let err = ClientError::Forbidden {
            message: Some("x".into()),
        };
        let r = LoginRejection::from_client(&err, Role::Student);
        assert_eq!(r.kind, RejectionKind::Exchange);
        assert_eq!(r.message, LOGIN_FAILED_MESSAGE);
        assert_eq!(r.notice, Notice::error("Student login failed"));
    }

    #[tokio::test]
    async fn missing_credential_rejects_without_network() {
        let client = PortalClient::new("http://127.0.0.1:9").unwrap();
        let mut flow = LoginFlow::new(Role::Student, client);
        let r = flow.submit(None).await.unwrap_err();
        assert_eq!(r.kind, RejectionKind::MissingCredential);
        assert_eq!(flow.error(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[test]
    fn provider_failure_sets_rejected_state() {
        let client = PortalClient::new("http://127.0.0.1:9").unwrap();
        let mut flow = LoginFlow::new(Role::Mentor, client);
        flow.provider_failed();
        assert_eq!(flow.error(), Some(PROVIDER_FAILED_MESSAGE));
        assert!(!flow.is_submitting());
    }
}
