//! Volunteer repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{
    NewVolunteer, NewVolunteerHours, Volunteer, VolunteerChanges, VolunteerHours,
    VolunteerWithAuth,
};
use super::permission::PermissionProfile;
use crate::domain::DomainResult;
use crate::shared::{PaginationParams, PaginationResult};

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Page of volunteers created on/after `since`, newest first unless sorted otherwise
    async fn fetch_from_date(
        &self,
        params: &PaginationParams,
        since: DateTime<Utc>,
    ) -> DomainResult<PaginationResult<Volunteer>>;

    /// Every volunteer created on/after `since`, newest first
    async fn find_created_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<Volunteer>>;

    async fn find_all(&self) -> DomainResult<Vec<Volunteer>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Volunteer>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Volunteer>>;

    async fn find_with_auth_by_email(&self, email: &str)
        -> DomainResult<Option<VolunteerWithAuth>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Fails with `VOLUNTEER_ALREADY_EXISTS` when the email is taken
    async fn create(&self, volunteer: NewVolunteer) -> DomainResult<Volunteer>;

    /// Update by email and re-read the record.
    ///
    /// With `has_class` set the class assignment is cleared and `created_at`
    /// restarts, so the volunteer shows up again in date-based listings.
    async fn update(
        &self,
        email: &str,
        changes: VolunteerChanges,
        has_class: bool,
    ) -> DomainResult<Option<Volunteer>>;

    async fn delete_by_email(&self, email: &str) -> DomainResult<bool>;

    /// Store a password hash; `false` when no volunteer has that email
    async fn set_password_for_email(&self, email: &str, password_hash: &str)
        -> DomainResult<bool>;

    async fn find_permission_by_name(&self, name: &str)
        -> DomainResult<Option<PermissionProfile>>;

    async fn save_permission(&self, profile: PermissionProfile) -> DomainResult<()>;

    async fn post_hours(&self, hours: NewVolunteerHours) -> DomainResult<VolunteerHours>;

    /// First hours record created after the start of `month` (0-11)
    async fn find_hours_by_month(
        &self,
        volunteer_id: i32,
        month: u32,
        year: i32,
    ) -> DomainResult<Option<VolunteerHours>>;
}
