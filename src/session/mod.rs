//! Session persistence: a bearer token plus the normalized user record,
//! kept in a key/value storage under two fixed keys.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{SessionError, SessionStore, TOKEN_KEY, USER_KEY};
