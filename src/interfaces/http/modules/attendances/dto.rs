//! Attendance DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::attendance::{
    Attendance, AttendanceInfo, NewAttendance, VolunteerAttendanceMetrics, WorkshopAttendanceRow,
};
use crate::interfaces::http::common::CsvRecord;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDto {
    pub id: i32,
    pub volunteer_id: i32,
    pub workshop_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Attendance> for AttendanceDto {
    fn from(a: Attendance) -> Self {
        Self {
            id: a.id,
            volunteer_id: a.volunteer_id,
            workshop_id: a.workshop_id,
            created_at: a.created_at,
        }
    }
}

/// Attendance with volunteer and workshop names
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInfoDto {
    pub id: i32,
    pub volunteer_id: i32,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub workshop_id: i32,
    pub workshop_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceInfo> for AttendanceInfoDto {
    fn from(a: AttendanceInfo) -> Self {
        Self {
            id: a.id,
            volunteer_id: a.volunteer_id,
            volunteer_name: a.volunteer_name,
            volunteer_email: a.volunteer_email,
            workshop_id: a.workshop_id,
            workshop_name: a.workshop_name,
            created_at: a.created_at,
        }
    }
}

impl CsvRecord for AttendanceInfoDto {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "volunteerId",
            "volunteerName",
            "volunteerEmail",
            "workshopId",
            "workshopName",
            "createdAt",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.volunteer_id.to_string(),
            self.volunteer_name.clone(),
            self.volunteer_email.clone(),
            self.workshop_id.to_string(),
            self.workshop_name.clone(),
            self.created_at.to_rfc3339(),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerMetricsDto {
    pub volunteer_id: i32,
    pub name: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub attendances: u64,
    pub evaluated_notebooks: u64,
}

impl From<VolunteerAttendanceMetrics> for VolunteerMetricsDto {
    fn from(m: VolunteerAttendanceMetrics) -> Self {
        Self {
            volunteer_id: m.volunteer_id,
            name: m.name,
            email: m.email,
            city: m.city,
            state: m.state,
            attendances: m.attendances,
            evaluated_notebooks: m.evaluated_notebooks,
        }
    }
}

impl CsvRecord for VolunteerMetricsDto {
    fn headers() -> &'static [&'static str] {
        &[
            "volunteerId",
            "name",
            "email",
            "city",
            "state",
            "attendances",
            "evaluatedNotebooks",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.volunteer_id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.city.clone(),
            self.state.clone(),
            self.attendances.to_string(),
            self.evaluated_notebooks.to_string(),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopAttendanceDto {
    pub workshop_id: i32,
    pub workshop_name: String,
    pub attended_at: DateTime<Utc>,
}

impl From<WorkshopAttendanceRow> for WorkshopAttendanceDto {
    fn from(r: WorkshopAttendanceRow) -> Self {
        Self {
            workshop_id: r.workshop_id,
            workshop_name: r.workshop_name,
            attended_at: r.attended_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceRequest {
    #[validate(range(min = 1))]
    pub volunteer_id: i32,
    #[validate(range(min = 1))]
    pub workshop_id: i32,
}

impl From<SubmitAttendanceRequest> for NewAttendance {
    fn from(r: SubmitAttendanceRequest) -> Self {
        Self {
            volunteer_id: r.volunteer_id,
            workshop_id: r.workshop_id,
        }
    }
}
