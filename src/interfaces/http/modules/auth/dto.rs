//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Permission, Volunteer};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub volunteer: AuthenticatedInfo,
}

/// The logged-in volunteer and what they may access
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedInfo {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub pep_id: Option<i32>,
    pub permissions: Vec<String>,
}

impl AuthenticatedInfo {
    pub fn new(volunteer: Volunteer, permissions: &[Permission]) -> Self {
        Self {
            id: volunteer.id,
            email: volunteer.email,
            name: volunteer.name,
            pep_id: volunteer.pep_id,
            permissions: permissions.iter().map(|p| p.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Required once a password has been set
    pub current_password: Option<String>,
    #[validate(length(min = 8, max = 128, message = "new password must be 8-128 characters"))]
    pub new_password: String,
}
