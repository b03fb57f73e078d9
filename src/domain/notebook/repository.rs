//! Notebook repository interface
//!
//! Lifecycle transitions are conditional updates: when the guard does not
//! match, nothing is written and the returned record is simply the current
//! one (or `None` when the id does not exist).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Notebook, NotebookChanges, NotebookEvaluation, NotebookEvaluationRow, Reflection};
use crate::domain::DomainResult;
use crate::shared::{PaginationParams, PaginationResult};

#[async_trait]
pub trait NotebookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Notebook>>;

    /// Assign an approved, free, unevaluated notebook to a volunteer
    async fn reserve(&self, volunteer_id: i32, id: i32) -> DomainResult<Option<Notebook>>;

    /// Release a reservation
    async fn revert_reservation(&self, id: i32) -> DomainResult<Option<Notebook>>;

    /// Record an evaluation unless one was already saved
    async fn save_evaluation(
        &self,
        id: i32,
        evaluation: NotebookEvaluation,
    ) -> DomainResult<Option<Notebook>>;

    async fn update(&self, id: i32, changes: NotebookChanges) -> DomainResult<Option<Notebook>>;

    async fn find_reserved_by_volunteer(&self, volunteer_id: i32) -> DomainResult<Vec<Notebook>>;

    async fn find_available(&self) -> DomainResult<Vec<Notebook>>;

    async fn count_evaluated_by_volunteer(&self, volunteer_id: i32) -> DomainResult<u64>;

    /// Page of the evaluation listing; `filter.classes` restricts to class ids
    async fn fetch_evaluations(
        &self,
        params: &PaginationParams,
    ) -> DomainResult<PaginationResult<NotebookEvaluationRow>>;

    /// Whole evaluation listing, same filters and order as the paged one
    async fn find_evaluations(&self, params: &PaginationParams)
        -> DomainResult<Vec<NotebookEvaluationRow>>;

    async fn find_reflections(&self, since: DateTime<Utc>) -> DomainResult<Vec<Reflection>>;
}
