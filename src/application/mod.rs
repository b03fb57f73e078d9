//! Application layer - use-cases on top of the repositories

pub mod identity;
pub mod notebooks;

pub use identity::{AuthResult, IdentityService};
pub use notebooks::NotebookService;
