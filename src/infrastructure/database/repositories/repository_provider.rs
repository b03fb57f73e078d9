//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::attendance::AttendanceRepository;
use crate::domain::notebook::NotebookRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::volunteer::VolunteerRepository;

use super::attendance_repository::SeaOrmAttendanceRepository;
use super::notebook_repository::SeaOrmNotebookRepository;
use super::volunteer_repository::SeaOrmVolunteerRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let volunteer = repos.volunteers().find_by_email("ana@pep.org").await?;
/// let available = repos.notebooks().find_available().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    volunteers: SeaOrmVolunteerRepository,
    notebooks: SeaOrmNotebookRepository,
    attendances: SeaOrmAttendanceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            volunteers: SeaOrmVolunteerRepository::new(db.clone()),
            notebooks: SeaOrmNotebookRepository::new(db.clone()),
            attendances: SeaOrmAttendanceRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn volunteers(&self) -> &dyn VolunteerRepository {
        &self.volunteers
    }

    fn notebooks(&self) -> &dyn NotebookRepository {
        &self.notebooks
    }

    fn attendances(&self) -> &dyn AttendanceRepository {
        &self.attendances
    }
}
