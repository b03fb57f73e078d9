//! Notebook reservation and evaluation use-cases
//!
//! The repository transitions are conditional updates that never fail when
//! their guard does not match. This service reads the resulting record and
//! turns "nothing happened" into the error a client should see.

use std::sync::Arc;

use tracing::info;

use crate::domain::notebook::{Notebook, NotebookEvaluation};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub const NOTEBOOK_NOT_AVAILABLE: &str = "NOTEBOOK_NOT_AVAILABLE";
pub const NOTEBOOK_ALREADY_EVALUATED: &str = "NOTEBOOK_ALREADY_EVALUATED";

pub struct NotebookService {
    repos: Arc<dyn RepositoryProvider>,
}

impl NotebookService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Reserve `id` for the volunteer.
    ///
    /// Reserving a notebook the volunteer already holds succeeds again.
    pub async fn reserve(&self, volunteer_id: i32, id: i32) -> DomainResult<Notebook> {
        let notebook = self
            .repos
            .notebooks()
            .reserve(volunteer_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notebook", "id", id))?;

        if !notebook.is_reserved_by(volunteer_id) {
            return Err(DomainError::conflict(
                NOTEBOOK_NOT_AVAILABLE,
                format!("Notebook {} is not available for reservation", id),
            ));
        }

        info!(notebook_id = id, volunteer_id, "Notebook reserved");
        Ok(notebook)
    }

    /// Release a reservation; an unreserved notebook is returned unchanged.
    pub async fn revert_reservation(&self, id: i32) -> DomainResult<Notebook> {
        self.repos
            .notebooks()
            .revert_reservation(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notebook", "id", id))
    }

    pub async fn evaluate(&self, id: i32, evaluation: NotebookEvaluation) -> DomainResult<Notebook> {
        let notebooks = self.repos.notebooks();

        let before = notebooks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notebook", "id", id))?;
        if before.evaluated_at.is_some() {
            return Err(already_evaluated(id));
        }

        let after = notebooks
            .save_evaluation(id, evaluation)
            .await?
            .ok_or_else(|| DomainError::not_found("Notebook", "id", id))?;

        // Another evaluation can land between the read and the update.
        match after.evaluated_at {
            Some(_) if after.evaluated_at != before.evaluated_at => {
                info!(notebook_id = id, "Notebook evaluated");
                Ok(after)
            }
            _ => Err(already_evaluated(id)),
        }
    }
}

fn already_evaluated(id: i32) -> DomainError {
    DomainError::conflict(
        NOTEBOOK_ALREADY_EVALUATED,
        format!("Notebook {} was already evaluated", id),
    )
}
