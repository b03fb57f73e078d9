//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::attendance::AttendanceRepository;
use super::notebook::NotebookRepository;
use super::volunteer::VolunteerRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Built once at startup and shared with the HTTP handlers:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let volunteer = repos.volunteers().find_by_id(7).await?;
///     let notebook = repos.notebooks().reserve(7, 12).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn volunteers(&self) -> &dyn VolunteerRepository;
    fn notebooks(&self) -> &dyn NotebookRepository;
    fn attendances(&self) -> &dyn AttendanceRepository;
}
