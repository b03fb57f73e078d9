//! Notebook domain entity
//!
//! A notebook is a student's evaluation record. It moves from
//! unreserved to reserved (a volunteer takes it) to evaluated; a
//! reservation can also be reverted.

use chrono::{DateTime, Utc};

/// Lifecycle position derived from the stored columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookState {
    Unreserved,
    Reserved {
        volunteer_id: i32,
        reserved_at: DateTime<Utc>,
    },
    Evaluated {
        evaluated_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub id: i32,
    /// Volunteer holding the reservation
    pub volunteer_id: Option<i32>,
    /// Class ("pep") the student belongs to
    pub pep_id: Option<i32>,
    pub student_name: String,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub evaluator_name: Option<String>,
    pub evaluator_email: Option<String>,
    pub subjects: Vec<String>,
    pub answers: Vec<String>,
    pub relevant_content: Option<String>,
    pub conclusion: Option<String>,
    pub approved: bool,
    pub archives_exclusion: bool,
    pub reserved_at: Option<DateTime<Utc>>,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Folder of the class, filled when the class is loaded alongside
    pub notebook_directory: Option<String>,
}

impl Notebook {
    pub fn state(&self) -> NotebookState {
        match (self.evaluated_at, self.volunteer_id, self.reserved_at) {
            (Some(evaluated_at), _, _) => NotebookState::Evaluated { evaluated_at },
            (None, Some(volunteer_id), Some(reserved_at)) => NotebookState::Reserved {
                volunteer_id,
                reserved_at,
            },
            _ => NotebookState::Unreserved,
        }
    }

    /// Mirrors the predicate of the reservation update.
    pub fn is_reservable(&self) -> bool {
        self.approved
            && self.volunteer_id.is_none()
            && self.reserved_at.is_none()
            && self.evaluated_at.is_none()
    }

    pub fn is_reserved_by(&self, volunteer_id: i32) -> bool {
        matches!(
            self.state(),
            NotebookState::Reserved { volunteer_id: holder, .. } if holder == volunteer_id
        )
    }
}

/// Evaluation submitted by the reserving volunteer
#[derive(Debug, Clone, Default)]
pub struct NotebookEvaluation {
    pub evaluator_name: String,
    pub evaluator_email: Option<String>,
    pub subjects: Vec<String>,
    pub answers: Vec<String>,
    pub relevant_content: Option<String>,
    pub conclusion: String,
    pub archives_exclusion: bool,
}

/// Administrative correction; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct NotebookChanges {
    pub pep_id: Option<i32>,
    pub student_name: Option<String>,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub approved: Option<bool>,
    pub conclusion: Option<String>,
}

/// Row of the evaluation listing, flattened with volunteer and place names
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookEvaluationRow {
    pub id: i32,
    pub pep_id: Option<i32>,
    pub place_name: Option<String>,
    pub volunteer_id: Option<i32>,
    pub volunteer_name: Option<String>,
    pub student_name: String,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub evaluator_name: Option<String>,
    pub evaluator_email: Option<String>,
    pub conclusion: Option<String>,
    pub approved: bool,
    pub archives_exclusion: bool,
    pub reserved_at: Option<DateTime<Utc>>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

/// Relevant content a student wrote, published as a reflection
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    pub student_name: String,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub relevant_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook() -> Notebook {
        Notebook {
            id: 1,
            volunteer_id: None,
            pep_id: Some(5),
            student_name: "Maria".into(),
            student_registration: Some("0042".into()),
            student_prison_unit: None,
            evaluator_name: None,
            evaluator_email: None,
            subjects: vec![],
            answers: vec![],
            relevant_content: None,
            conclusion: None,
            approved: true,
            archives_exclusion: false,
            reserved_at: None,
            evaluated_at: None,
            created_at: Utc::now(),
            notebook_directory: None,
        }
    }

    #[test]
    fn fresh_approved_notebook_is_reservable() {
        let nb = notebook();
        assert_eq!(nb.state(), NotebookState::Unreserved);
        assert!(nb.is_reservable());
    }

    #[test]
    fn unapproved_notebook_is_not_reservable() {
        let nb = Notebook {
            approved: false,
            ..notebook()
        };
        assert!(!nb.is_reservable());
    }

    #[test]
    fn reserved_state_names_the_holder() {
        let now = Utc::now();
        let nb = Notebook {
            volunteer_id: Some(7),
            reserved_at: Some(now),
            ..notebook()
        };
        assert_eq!(
            nb.state(),
            NotebookState::Reserved {
                volunteer_id: 7,
                reserved_at: now
            }
        );
        assert!(nb.is_reserved_by(7));
        assert!(!nb.is_reserved_by(8));
        assert!(!nb.is_reservable());
    }

    #[test]
    fn evaluation_wins_over_reservation() {
        let now = Utc::now();
        let nb = Notebook {
            volunteer_id: Some(7),
            reserved_at: Some(now),
            evaluated_at: Some(now),
            ..notebook()
        };
        assert_eq!(nb.state(), NotebookState::Evaluated { evaluated_at: now });
        assert!(!nb.is_reserved_by(7));
    }

    #[test]
    fn volunteer_without_timestamp_counts_as_unreserved() {
        let nb = Notebook {
            volunteer_id: Some(3),
            ..notebook()
        };
        assert_eq!(nb.state(), NotebookState::Unreserved);
        assert!(!nb.is_reservable());
    }
}
