//! Mentorship portal: a same-origin relay to the backend plus the client-side
//! session, login and dashboard logic that talks through it.

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod meetings;
pub mod navigation;
pub mod proxy;
pub mod session;
pub mod state;
