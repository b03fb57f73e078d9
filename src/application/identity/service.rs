//! Volunteer authentication service
//!
//! HTTP handlers stay thin and delegate login, password changes and the
//! first-start administrator to this service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::AdminConfig;
use crate::domain::volunteer::{NewVolunteer, VolunteerChanges};
use crate::domain::{
    DomainError, DomainResult, Permission, PermissionProfile, RepositoryProvider, Volunteer,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authorization profile granted to the seeded administrator
pub const ADMIN_PROFILE: &str = "admin";

pub const MIN_PASSWORD_LEN: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub volunteer: Volunteer,
    pub permissions: Vec<Permission>,
}

pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and issue a token carrying the volunteer's
    /// permission scopes.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(found) = self.repos.volunteers().find_with_auth_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        // Volunteers who signed up without a password cannot log in yet.
        let Some(hash) = found.password_hash.as_deref() else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !verify_password(password, hash).unwrap_or(false) {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let permissions = self.permissions_for(found.authorization.as_deref()).await?;
        let volunteer = found.volunteer;

        let token = create_token(volunteer.id, &volunteer.email, &permissions, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(volunteer_id = volunteer.id, "Volunteer logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            volunteer,
            permissions,
        })
    }

    /// Permissions granted by a named profile; none without a profile.
    pub async fn permissions_for(&self, authorization: Option<&str>) -> DomainResult<Vec<Permission>> {
        let Some(name) = authorization else {
            return Ok(Vec::new());
        };
        Ok(self
            .repos
            .volunteers()
            .find_permission_by_name(name)
            .await?
            .map(|profile| profile.granted())
            .unwrap_or_default())
    }

    // ── Passwords ───────────────────────────────────────────────

    /// Set the password of `email`.
    ///
    /// When a password already exists the current one must be supplied.
    pub async fn change_password(
        &self,
        email: &str,
        current_password: Option<&str>,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password(new_password)?;

        let found = self
            .repos
            .volunteers()
            .find_with_auth_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Volunteer", "email", email))?;

        if let Some(hash) = found.password_hash.as_deref() {
            let current = current_password.unwrap_or_default();
            if !verify_password(current, hash).unwrap_or(false) {
                return Err(DomainError::Unauthorized("Invalid current password".into()));
            }
        }

        self.store_password(email, new_password).await?;
        info!(email, "Password changed");
        Ok(())
    }

    /// Hash and store a password without checking the previous one.
    pub async fn set_password(&self, email: &str, password: &str) -> DomainResult<()> {
        validate_password(password)?;
        self.store_password(email, password).await
    }

    async fn store_password(&self, email: &str, password: &str) -> DomainResult<()> {
        let hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        if !self
            .repos
            .volunteers()
            .set_password_for_email(email, &hash)
            .await?
        {
            return Err(DomainError::not_found("Volunteer", "email", email));
        }
        Ok(())
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create the `admin` profile and the configured administrator when the
    /// volunteer table is empty. Returns whether anything was created.
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<bool> {
        let volunteers = self.repos.volunteers();
        if volunteers.count().await? > 0 {
            return Ok(false);
        }

        info!("Creating default administrator...");
        volunteers
            .save_permission(PermissionProfile::full(ADMIN_PROFILE))
            .await?;

        volunteers.create(admin_volunteer(admin)).await?;
        volunteers
            .update(
                &admin.email,
                VolunteerChanges {
                    authorization: Some(ADMIN_PROFILE.to_string()),
                    ..Default::default()
                },
                false,
            )
            .await?;
        self.store_password(&admin.email, &admin.password).await?;

        info!("Default administrator created: {}", admin.email);
        info!("⚠️  Please change the admin password immediately!");
        Ok(true)
    }
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn admin_volunteer(admin: &AdminConfig) -> NewVolunteer {
    NewVolunteer {
        email: admin.email.clone(),
        name: admin.name.clone(),
        pep_id: None,
        birth_date: Utc::now().date_naive(),
        phone_number: String::new(),
        country: String::new(),
        state: String::new(),
        city: String::new(),
        disability: None,
        how_found_pep: String::new(),
        knowledge_pep: String::new(),
        workshops: Vec::new(),
        schooling: String::new(),
        bachelor: None,
        studies_knowledge: String::new(),
        life_experience: String::new(),
        desires: String::new(),
        roles_pep: Vec::new(),
        interest_future_roles: Vec::new(),
        need_declaration: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::database::repositories::test_support::{new_volunteer, setup_db};
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "identity-test".into(),
            expiration_hours: 2,
            issuer: "pep-admin".into(),
        }
    }

    fn admin() -> AdminConfig {
        AdminConfig {
            email: "root@pep.org".into(),
            name: "Root".into(),
            password: "root-password".into(),
        }
    }

    async fn service() -> (IdentityService, Arc<dyn RepositoryProvider>) {
        let db = setup_db().await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        (IdentityService::new(repos.clone(), jwt()), repos)
    }

    #[tokio::test]
    async fn seeded_admin_logs_in_with_every_permission() {
        let (service, _) = service().await;
        assert!(service.ensure_default_admin(&admin()).await.unwrap());

        let auth = service.login("root@pep.org", "root-password").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 7200);
        assert_eq!(auth.permissions, Permission::ALL.to_vec());

        let claims = verify_token(&auth.token, &jwt()).unwrap();
        assert_eq!(claims.volunteer_id(), Some(auth.volunteer.id));
        assert!(claims.has_permission(Permission::ManageVolunteer));
    }

    #[tokio::test]
    async fn admin_is_only_seeded_into_an_empty_table() {
        let (service, repos) = service().await;
        repos
            .volunteers()
            .create(new_volunteer("ana@pep.org", "Ana"))
            .await
            .unwrap();

        assert!(!service.ensure_default_admin(&admin()).await.unwrap());
        assert!(repos
            .volunteers()
            .find_by_email("root@pep.org")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (service, _) = service().await;
        service.ensure_default_admin(&admin()).await.unwrap();

        let wrong = service.login("root@pep.org", "nope-nope").await.unwrap_err();
        let unknown = service.login("ghost@pep.org", "root-password").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn volunteer_without_password_cannot_log_in() {
        let (service, repos) = service().await;
        repos
            .volunteers()
            .create(new_volunteer("ana@pep.org", "Ana"))
            .await
            .unwrap();

        let err = service.login("ana@pep.org", "").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn first_password_needs_no_current_one() {
        let (service, repos) = service().await;
        repos
            .volunteers()
            .create(new_volunteer("ana@pep.org", "Ana"))
            .await
            .unwrap();

        service
            .change_password("ana@pep.org", None, "first-password")
            .await
            .unwrap();
        let auth = service.login("ana@pep.org", "first-password").await.unwrap();
        assert!(auth.permissions.is_empty());

        let err = service
            .change_password("ana@pep.org", Some("wrong-one"), "second-password")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let (service, _) = service().await;
        let err = service
            .change_password("ana@pep.org", None, "short")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_profile_grants_nothing() {
        let (service, _) = service().await;
        assert!(service.permissions_for(None).await.unwrap().is_empty());
        assert!(service
            .permissions_for(Some("missing"))
            .await
            .unwrap()
            .is_empty());
    }
}
