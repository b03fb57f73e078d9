use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{
    Attendance, AttendanceInfo, NewAttendance, VolunteerAttendanceMetrics, WorkshopAttendanceRow,
};
use crate::domain::DomainResult;
use crate::shared::{PaginationParams, PaginationResult};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn fetch_from_date(
        &self,
        params: &PaginationParams,
        since: DateTime<Utc>,
    ) -> DomainResult<PaginationResult<AttendanceInfo>>;

    async fn find_from_date(&self, since: DateTime<Utc>) -> DomainResult<Vec<AttendanceInfo>>;

    async fn fetch_metrics(
        &self,
        params: &PaginationParams,
    ) -> DomainResult<PaginationResult<VolunteerAttendanceMetrics>>;

    async fn find_metrics(&self) -> DomainResult<Vec<VolunteerAttendanceMetrics>>;

    async fn find_by_volunteer(&self, volunteer_id: i32)
        -> DomainResult<Vec<WorkshopAttendanceRow>>;

    /// Fails with `ATTENDANCE_ALREADY_SUBMITTED` for a repeated
    /// volunteer/workshop pair and `WORKSHOP_NOT_FOUND` for an unknown workshop
    async fn submit(&self, attendance: NewAttendance) -> DomainResult<Attendance>;
}
