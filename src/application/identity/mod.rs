//! Identity module: volunteer authentication
//!
//! Contains the `IdentityService` which handles login, password changes
//! and seeding of the first administrator.

pub mod service;

pub use service::{AuthResult, IdentityService, ADMIN_PROFILE};
