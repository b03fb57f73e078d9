//! Volunteer domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Registered volunteer
#[derive(Debug, Clone, PartialEq)]
pub struct Volunteer {
    pub id: i32,
    pub email: String,
    pub name: String,
    /// Class the volunteer is currently assigned to
    pub pep_id: Option<i32>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub disability: Option<String>,
    pub how_found_pep: String,
    pub knowledge_pep: String,
    pub workshops: Vec<String>,
    pub schooling: String,
    pub bachelor: Option<String>,
    pub studies_knowledge: String,
    pub life_experience: String,
    pub desires: String,
    pub roles_pep: Vec<String>,
    pub interest_future_roles: Vec<String>,
    pub need_declaration: bool,
    pub created_at: DateTime<Utc>,
}

/// Sign-up data for a new volunteer
#[derive(Debug, Clone)]
pub struct NewVolunteer {
    pub email: String,
    pub name: String,
    pub pep_id: Option<i32>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub disability: Option<String>,
    pub how_found_pep: String,
    pub knowledge_pep: String,
    pub workshops: Vec<String>,
    pub schooling: String,
    pub bachelor: Option<String>,
    pub studies_knowledge: String,
    pub life_experience: String,
    pub desires: String,
    pub roles_pep: Vec<String>,
    pub interest_future_roles: Vec<String>,
    pub need_declaration: bool,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct VolunteerChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub pep_id: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub disability: Option<String>,
    pub how_found_pep: Option<String>,
    pub knowledge_pep: Option<String>,
    pub workshops: Option<Vec<String>>,
    pub schooling: Option<String>,
    pub bachelor: Option<String>,
    pub studies_knowledge: Option<String>,
    pub life_experience: Option<String>,
    pub desires: Option<String>,
    pub roles_pep: Option<Vec<String>>,
    pub interest_future_roles: Option<Vec<String>>,
    pub need_declaration: Option<bool>,
    /// Name of the authorization profile granting permissions
    pub authorization: Option<String>,
}

/// Volunteer plus the credentials used at login
#[derive(Debug, Clone)]
pub struct VolunteerWithAuth {
    pub volunteer: Volunteer,
    pub password_hash: Option<String>,
    pub authorization: Option<String>,
}

/// Hours a volunteer logged for a month
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerHours {
    pub id: i32,
    pub volunteer_id: i32,
    pub hours: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVolunteerHours {
    pub volunteer_id: i32,
    pub hours: f64,
    pub description: Option<String>,
}
