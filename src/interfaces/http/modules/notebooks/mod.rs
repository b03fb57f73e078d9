//! Notebook module: reservation, evaluation, reflections and CSV export

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
