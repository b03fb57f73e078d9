//! Authentication module: login, current volunteer, password change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
