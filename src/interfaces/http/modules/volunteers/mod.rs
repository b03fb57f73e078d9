//! Volunteer module: sign-up, listings, CSV export, hours

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
