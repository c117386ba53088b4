//! SF-03 Auth Service - signup and login over JSON/HTTP.
//!
//! Users live in a [`UserStore`](ports::UserStore); the shipped adapter keeps
//! them in memory. Passwords are compared as opaque strings. Callers going
//! through the gateway only ever send SHA-256 hex digests.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryUserStore;
pub use domain::{AuthConfig, AuthError, NewUser, StoreError, User};
pub use ports::UserStore;
pub use service::AuthService;
