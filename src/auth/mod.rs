mod dto;
mod guard;
pub mod login;
mod user;

pub use dto::{BackendUser, ExchangeRequest, ExchangeResponse};
pub use guard::{logout, redirect_if_authenticated, require_session};
pub use login::{LoginFlow, LoginRejection, LoginState, LoginSuccess, RejectionKind};
pub use user::{AuthUser, Role, Session};
