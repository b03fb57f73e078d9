//! Notebook DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::notebook::{
    Notebook, NotebookChanges, NotebookEvaluation, NotebookEvaluationRow, NotebookState,
    Reflection,
};
use crate::interfaces::http::common::csv::{opt, CsvRecord};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotebookDto {
    pub id: i32,
    /// `unreserved`, `reserved` or `evaluated`
    pub status: String,
    pub volunteer_id: Option<i32>,
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
    pub notebook_directory: Option<String>,
}

impl From<Notebook> for NotebookDto {
    fn from(n: Notebook) -> Self {
        let status = match n.state() {
            NotebookState::Unreserved => "unreserved",
            NotebookState::Reserved { .. } => "reserved",
            NotebookState::Evaluated { .. } => "evaluated",
        };
        Self {
            id: n.id,
            status: status.to_string(),
            volunteer_id: n.volunteer_id,
            pep_id: n.pep_id,
            student_name: n.student_name,
            student_registration: n.student_registration,
            student_prison_unit: n.student_prison_unit,
            evaluator_name: n.evaluator_name,
            evaluator_email: n.evaluator_email,
            subjects: n.subjects,
            answers: n.answers,
            relevant_content: n.relevant_content,
            conclusion: n.conclusion,
            approved: n.approved,
            archives_exclusion: n.archives_exclusion,
            reserved_at: n.reserved_at,
            evaluated_at: n.evaluated_at,
            created_at: n.created_at,
            notebook_directory: n.notebook_directory,
        }
    }
}

/// Evaluation listing row, flattened with volunteer and place names
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRowDto {
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

impl From<NotebookEvaluationRow> for EvaluationRowDto {
    fn from(r: NotebookEvaluationRow) -> Self {
        Self {
            id: r.id,
            pep_id: r.pep_id,
            place_name: r.place_name,
            volunteer_id: r.volunteer_id,
            volunteer_name: r.volunteer_name,
            student_name: r.student_name,
            student_registration: r.student_registration,
            student_prison_unit: r.student_prison_unit,
            evaluator_name: r.evaluator_name,
            evaluator_email: r.evaluator_email,
            conclusion: r.conclusion,
            approved: r.approved,
            archives_exclusion: r.archives_exclusion,
            reserved_at: r.reserved_at,
            evaluated_at: r.evaluated_at,
        }
    }
}

impl CsvRecord for EvaluationRowDto {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "pepId",
            "placeName",
            "volunteerId",
            "volunteerName",
            "studentName",
            "studentRegistration",
            "studentPrisonUnit",
            "evaluatorName",
            "evaluatorEmail",
            "conclusion",
            "approved",
            "archivesExclusion",
            "reservedAt",
            "evaluatedAt",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(&self.pep_id),
            opt(&self.place_name),
            opt(&self.volunteer_id),
            opt(&self.volunteer_name),
            self.student_name.clone(),
            opt(&self.student_registration),
            opt(&self.student_prison_unit),
            opt(&self.evaluator_name),
            opt(&self.evaluator_email),
            opt(&self.conclusion),
            self.approved.to_string(),
            self.archives_exclusion.to_string(),
            self.reserved_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
            self.evaluated_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionDto {
    pub student_name: String,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub relevant_content: String,
}

impl From<Reflection> for ReflectionDto {
    fn from(r: Reflection) -> Self {
        Self {
            student_name: r.student_name,
            student_registration: r.student_registration,
            student_prison_unit: r.student_prison_unit,
            relevant_content: r.relevant_content,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluatedCountDto {
    pub count: u64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    #[validate(length(min = 1, max = 120, message = "evaluator name is required"))]
    pub evaluator_name: String,
    #[validate(email(message = "invalid email format"))]
    pub evaluator_email: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub answers: Vec<String>,
    pub relevant_content: Option<String>,
    #[validate(length(min = 1, message = "conclusion is required"))]
    pub conclusion: String,
    #[serde(default)]
    pub archives_exclusion: bool,
}

impl From<EvaluationRequest> for NotebookEvaluation {
    fn from(r: EvaluationRequest) -> Self {
        Self {
            evaluator_name: r.evaluator_name,
            evaluator_email: r.evaluator_email,
            subjects: r.subjects,
            answers: r.answers,
            relevant_content: r.relevant_content.filter(|c| !c.trim().is_empty()),
            conclusion: r.conclusion,
            archives_exclusion: r.archives_exclusion,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotebookRequest {
    pub pep_id: Option<i32>,
    #[validate(length(min = 1, max = 120))]
    pub student_name: Option<String>,
    pub student_registration: Option<String>,
    pub student_prison_unit: Option<String>,
    pub approved: Option<bool>,
    pub conclusion: Option<String>,
}

impl From<UpdateNotebookRequest> for NotebookChanges {
    fn from(r: UpdateNotebookRequest) -> Self {
        Self {
            pep_id: r.pep_id,
            student_name: r.student_name,
            student_registration: r.student_registration,
            student_prison_unit: r.student_prison_unit,
            approved: r.approved,
            conclusion: r.conclusion,
        }
    }
}
