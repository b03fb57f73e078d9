//! Database entities module

pub mod attendance;
pub mod authorization;
pub mod notebook;
pub mod pep_class;
pub mod place;
pub mod volunteer;
pub mod volunteer_hours;
pub mod workshop;

pub use attendance::Entity as Attendance;
pub use authorization::Entity as Authorization;
pub use notebook::Entity as Notebook;
pub use pep_class::Entity as PepClass;
pub use place::Entity as Place;
pub use volunteer::Entity as Volunteer;
pub use volunteer_hours::Entity as VolunteerHours;
pub use workshop::Entity as Workshop;
