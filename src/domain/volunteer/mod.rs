//! Volunteer aggregate
//!
//! Volunteers, their logged hours and the authorization profiles that grant
//! them access to the admin modules.

pub mod model;
pub mod permission;
pub mod repository;

pub use model::{
    NewVolunteer, NewVolunteerHours, Volunteer, VolunteerChanges, VolunteerHours,
    VolunteerWithAuth,
};
pub use permission::{Permission, PermissionProfile};
pub use repository::VolunteerRepository;
