//! Volunteer DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::volunteer::{
    NewVolunteer, NewVolunteerHours, Volunteer, VolunteerChanges, VolunteerHours,
};
use crate::interfaces::http::common::csv::{opt, CsvRecord};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerDto {
    pub id: i32,
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
    pub created_at: DateTime<Utc>,
}

impl From<Volunteer> for VolunteerDto {
    fn from(v: Volunteer) -> Self {
        Self {
            id: v.id,
            email: v.email,
            name: v.name,
            pep_id: v.pep_id,
            birth_date: v.birth_date,
            phone_number: v.phone_number,
            country: v.country,
            state: v.state,
            city: v.city,
            disability: v.disability,
            how_found_pep: v.how_found_pep,
            knowledge_pep: v.knowledge_pep,
            workshops: v.workshops,
            schooling: v.schooling,
            bachelor: v.bachelor,
            studies_knowledge: v.studies_knowledge,
            life_experience: v.life_experience,
            desires: v.desires,
            roles_pep: v.roles_pep,
            interest_future_roles: v.interest_future_roles,
            need_declaration: v.need_declaration,
            created_at: v.created_at,
        }
    }
}

impl CsvRecord for VolunteerDto {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "email",
            "name",
            "pepId",
            "birthDate",
            "phoneNumber",
            "country",
            "state",
            "city",
            "disability",
            "howFoundPep",
            "knowledgePep",
            "workshops",
            "schooling",
            "bachelor",
            "studiesKnowledge",
            "lifeExperience",
            "desires",
            "rolesPep",
            "interestFutureRoles",
            "needDeclaration",
            "createdAt",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.email.clone(),
            self.name.clone(),
            opt(&self.pep_id),
            self.birth_date.to_string(),
            self.phone_number.clone(),
            self.country.clone(),
            self.state.clone(),
            self.city.clone(),
            opt(&self.disability),
            self.how_found_pep.clone(),
            self.knowledge_pep.clone(),
            self.workshops.join("; "),
            self.schooling.clone(),
            opt(&self.bachelor),
            self.studies_knowledge.clone(),
            self.life_experience.clone(),
            self.desires.clone(),
            self.roles_pep.join("; "),
            self.interest_future_roles.join("; "),
            self.need_declaration.to_string(),
            self.created_at.to_rfc3339(),
        ]
    }
}

/// Volunteer sign-up form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    pub pep_id: Option<i32>,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, max = 30))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub disability: Option<String>,
    #[serde(default)]
    pub how_found_pep: String,
    #[serde(default)]
    pub knowledge_pep: String,
    #[serde(default)]
    pub workshops: Vec<String>,
    #[serde(default)]
    pub schooling: String,
    pub bachelor: Option<String>,
    #[serde(default)]
    pub studies_knowledge: String,
    #[serde(default)]
    pub life_experience: String,
    #[serde(default)]
    pub desires: String,
    #[serde(default)]
    pub roles_pep: Vec<String>,
    #[serde(default)]
    pub interest_future_roles: Vec<String>,
    #[serde(default)]
    pub need_declaration: bool,
    /// Optional initial password, enables login right away
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: Option<String>,
}

impl CreateVolunteerRequest {
    /// Split off the password, which is stored separately.
    pub fn into_parts(self) -> (NewVolunteer, Option<String>) {
        let volunteer = NewVolunteer {
            email: self.email,
            name: self.name,
            pep_id: self.pep_id,
            birth_date: self.birth_date,
            phone_number: self.phone_number,
            country: self.country,
            state: self.state,
            city: self.city,
            disability: self.disability,
            how_found_pep: self.how_found_pep,
            knowledge_pep: self.knowledge_pep,
            workshops: self.workshops,
            schooling: self.schooling,
            bachelor: self.bachelor,
            studies_knowledge: self.studies_knowledge,
            life_experience: self.life_experience,
            desires: self.desires,
            roles_pep: self.roles_pep,
            interest_future_roles: self.interest_future_roles,
            need_declaration: self.need_declaration,
        };
        (volunteer, self.password)
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteerRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub pep_id: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 30))]
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
    /// Authorization profile name; only managers may change it
    pub authorization: Option<String>,
    /// Clear the class assignment and restart the sign-up date
    #[serde(default)]
    pub has_class: bool,
}

impl UpdateVolunteerRequest {
    pub fn into_parts(self) -> (VolunteerChanges, bool) {
        let changes = VolunteerChanges {
            email: self.email,
            name: self.name,
            pep_id: self.pep_id,
            birth_date: self.birth_date,
            phone_number: self.phone_number,
            country: self.country,
            state: self.state,
            city: self.city,
            disability: self.disability,
            how_found_pep: self.how_found_pep,
            knowledge_pep: self.knowledge_pep,
            workshops: self.workshops,
            schooling: self.schooling,
            bachelor: self.bachelor,
            studies_knowledge: self.studies_knowledge,
            life_experience: self.life_experience,
            desires: self.desires,
            roles_pep: self.roles_pep,
            interest_future_roles: self.interest_future_roles,
            need_declaration: self.need_declaration,
            authorization: self.authorization,
        };
        (changes, self.has_class)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostHoursRequest {
    #[validate(range(min = 1))]
    pub volunteer_id: i32,
    #[validate(range(min = 0.0, max = 744.0, message = "hours must be between 0 and 744"))]
    pub hours: f64,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl From<PostHoursRequest> for NewVolunteerHours {
    fn from(r: PostHoursRequest) -> Self {
        Self {
            volunteer_id: r.volunteer_id,
            hours: r.hours,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HoursQuery {
    /// Month, zero-based (0 = January)
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerHoursDto {
    pub id: i32,
    pub volunteer_id: i32,
    pub hours: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<VolunteerHours> for VolunteerHoursDto {
    fn from(h: VolunteerHours) -> Self {
        Self {
            id: h.id,
            volunteer_id: h.volunteer_id,
            hours: h.hours,
            description: h.description,
            created_at: h.created_at,
        }
    }
}
