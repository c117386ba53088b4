//! SF-Client: demo client for the Storefront services.
//!
//! Runs the signup → login → product lookup sequence either directly against
//! the auth and catalog services or through the API gateway.

pub mod api;

pub use api::{ClientError, DirectClient, GatewayClient, Signup};
