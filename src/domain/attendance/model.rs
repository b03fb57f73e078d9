//! Workshop attendance domain entity

use chrono::{DateTime, Utc};

/// A volunteer's presence at a training workshop
#[derive(Debug, Clone, PartialEq)]
pub struct Attendance {
    pub id: i32,
    pub volunteer_id: i32,
    pub workshop_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub volunteer_id: i32,
    pub workshop_id: i32,
}

/// Attendance joined with the volunteer and workshop it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceInfo {
    pub id: i32,
    pub volunteer_id: i32,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub workshop_id: i32,
    pub workshop_name: String,
    pub created_at: DateTime<Utc>,
}

/// One line of a volunteer's own attendance history
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopAttendanceRow {
    pub workshop_id: i32,
    pub workshop_name: String,
    pub attended_at: DateTime<Utc>,
}

/// Per-volunteer participation counters
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerAttendanceMetrics {
    pub volunteer_id: i32,
    pub name: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub attendances: u64,
    pub evaluated_notebooks: u64,
}
