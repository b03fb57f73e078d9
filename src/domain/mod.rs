pub mod attendance;
pub mod notebook;
pub mod repositories;
pub mod volunteer;

pub use attendance::{AttendanceRepository, AttendanceInfo, VolunteerAttendanceMetrics};
pub use notebook::{Notebook, NotebookRepository, NotebookState};
pub use repositories::{DomainResult, RepositoryProvider};
pub use volunteer::{Permission, PermissionProfile, Volunteer, VolunteerRepository};

pub use crate::shared::errors::DomainError;
