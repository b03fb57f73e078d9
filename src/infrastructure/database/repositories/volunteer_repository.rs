//! SeaORM implementation of VolunteerRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::query::{apply_filters, apply_sort, fetch_page, Field, FieldKind};
use super::{decode_list, encode_list, is_unique_violation};
use crate::domain::volunteer::{
    NewVolunteer, NewVolunteerHours, PermissionProfile, Volunteer, VolunteerChanges,
    VolunteerHours, VolunteerRepository, VolunteerWithAuth,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{authorization, volunteer, volunteer_hours};
use crate::shared::time::month_start;
use crate::shared::{wrap_pagination, PaginationParams, PaginationResult};

pub struct SeaOrmVolunteerRepository {
    db: DatabaseConnection,
}

impl SeaOrmVolunteerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: volunteer::Model) -> Volunteer {
    Volunteer {
        id: m.id,
        email: m.email,
        name: m.name,
        pep_id: m.pep_id,
        birth_date: m.birth_date,
        phone_number: m.phone_number,
        country: m.country,
        state: m.state,
        city: m.city,
        disability: m.disability,
        how_found_pep: m.how_found_pep,
        knowledge_pep: m.knowledge_pep,
        workshops: decode_list(&m.workshops),
        schooling: m.schooling,
        bachelor: m.bachelor,
        studies_knowledge: m.studies_knowledge,
        life_experience: m.life_experience,
        desires: m.desires,
        roles_pep: decode_list(&m.roles_pep),
        interest_future_roles: decode_list(&m.interest_future_roles),
        need_declaration: m.need_declaration,
        created_at: m.created_at,
    }
}

fn hours_to_domain(m: volunteer_hours::Model) -> VolunteerHours {
    VolunteerHours {
        id: m.id,
        volunteer_id: m.volunteer_id,
        hours: m.hours,
        description: m.description,
        created_at: m.created_at,
    }
}

fn profile_to_domain(m: authorization::Model) -> PermissionProfile {
    PermissionProfile {
        name: m.name,
        read: m.read_permission,
        attendance_module: m.attendance_module_permission,
        manage_volunteer_module: m.manage_volunteer_module_permission,
        notebook_module: m.notebook_module_permission,
    }
}

fn changes_to_active(changes: VolunteerChanges, has_class: bool) -> volunteer::ActiveModel {
    let mut active = <volunteer::ActiveModel as Default>::default();

    if let Some(v) = changes.email {
        active.email = Set(v);
    }
    if let Some(v) = changes.name {
        active.name = Set(v);
    }
    if let Some(v) = changes.pep_id {
        active.pep_id = Set(Some(v));
    }
    if let Some(v) = changes.birth_date {
        active.birth_date = Set(v);
    }
    if let Some(v) = changes.phone_number {
        active.phone_number = Set(v);
    }
    if let Some(v) = changes.country {
        active.country = Set(v);
    }
    if let Some(v) = changes.state {
        active.state = Set(v);
    }
    if let Some(v) = changes.city {
        active.city = Set(v);
    }
    if let Some(v) = changes.disability {
        active.disability = Set(Some(v));
    }
    if let Some(v) = changes.how_found_pep {
        active.how_found_pep = Set(v);
    }
    if let Some(v) = changes.knowledge_pep {
        active.knowledge_pep = Set(v);
    }
    if let Some(v) = changes.workshops {
        active.workshops = Set(encode_list(&v));
    }
    if let Some(v) = changes.schooling {
        active.schooling = Set(v);
    }
    if let Some(v) = changes.bachelor {
        active.bachelor = Set(Some(v));
    }
    if let Some(v) = changes.studies_knowledge {
        active.studies_knowledge = Set(v);
    }
    if let Some(v) = changes.life_experience {
        active.life_experience = Set(v);
    }
    if let Some(v) = changes.desires {
        active.desires = Set(v);
    }
    if let Some(v) = changes.roles_pep {
        active.roles_pep = Set(encode_list(&v));
    }
    if let Some(v) = changes.interest_future_roles {
        active.interest_future_roles = Set(encode_list(&v));
    }
    if let Some(v) = changes.need_declaration {
        active.need_declaration = Set(v);
    }
    if let Some(v) = changes.authorization {
        active.authorization = Set(Some(v));
    }

    // Joining a class restarts the volunteer's listing date
    if has_class {
        active.pep_id = Set(None);
        active.created_at = Set(Utc::now());
    }

    active
}

/// Columns callers may filter and sort the listing by.
fn listing_field(name: &str) -> Option<Field> {
    use volunteer::Column;
    let field = match name {
        "id" => Field::of(Column::Id, FieldKind::Int),
        "pep_id" => Field::of(Column::PepId, FieldKind::Int),
        "email" => Field::of(Column::Email, FieldKind::Text),
        "name" => Field::of(Column::Name, FieldKind::Text),
        "phone_number" => Field::of(Column::PhoneNumber, FieldKind::Text),
        "country" => Field::of(Column::Country, FieldKind::Text),
        "state" => Field::of(Column::State, FieldKind::Text),
        "city" => Field::of(Column::City, FieldKind::Text),
        "disability" => Field::of(Column::Disability, FieldKind::Text),
        "how_found_pep" => Field::of(Column::HowFoundPep, FieldKind::Text),
        "knowledge_pep" => Field::of(Column::KnowledgePep, FieldKind::Text),
        "schooling" => Field::of(Column::Schooling, FieldKind::Text),
        "bachelor" => Field::of(Column::Bachelor, FieldKind::Text),
        "need_declaration" => Field::of(Column::NeedDeclaration, FieldKind::Bool),
        "authorization" => Field::of(Column::Authorization, FieldKind::Text),
        _ => return None,
    };
    Some(field)
}

fn sort_field(name: &str) -> Option<Field> {
    use volunteer::Column;
    match name {
        "birth_date" => Some(Field::of(Column::BirthDate, FieldKind::Text)),
        "created_at" => Some(Field::of(Column::CreatedAt, FieldKind::Text)),
        other => listing_field(other),
    }
}

// ── VolunteerRepository impl ────────────────────────────────────

#[async_trait]
impl VolunteerRepository for SeaOrmVolunteerRepository {
    async fn fetch_from_date(
        &self,
        params: &PaginationParams,
        since: DateTime<Utc>,
    ) -> DomainResult<PaginationResult<Volunteer>> {
        debug!("Fetching volunteers created since {}", since);

        let select = volunteer::Entity::find().filter(volunteer::Column::CreatedAt.gte(since));
        let select = apply_filters(select, &params.filter, listing_field);
        let select = apply_sort(select, &params.sort, sort_field)
            .order_by_desc(volunteer::Column::CreatedAt)
            .order_by_desc(volunteer::Column::Id);

        let page = wrap_pagination(params, move || async move {
            let (rows, total) = fetch_page::<_, volunteer::Model>(&self.db, select, params).await?;
            Ok::<_, DomainError>((rows.into_iter().map(model_to_domain).collect(), total))
        })
        .await?;
        Ok(page)
    }

    async fn find_created_since(&self, since: DateTime<Utc>) -> DomainResult<Vec<Volunteer>> {
        let models = volunteer::Entity::find()
            .filter(volunteer::Column::CreatedAt.gte(since))
            .order_by_desc(volunteer::Column::CreatedAt)
            .order_by_desc(volunteer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Volunteer>> {
        let models = volunteer::Entity::find()
            .order_by_asc(volunteer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Volunteer>> {
        let model = volunteer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Volunteer>> {
        let model = volunteer::Entity::find()
            .filter(volunteer::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_with_auth_by_email(
        &self,
        email: &str,
    ) -> DomainResult<Option<VolunteerWithAuth>> {
        let model = volunteer::Entity::find()
            .filter(volunteer::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| {
            let password_hash = m.password_hash.clone();
            let authorization = m.authorization.clone();
            VolunteerWithAuth {
                volunteer: model_to_domain(m),
                password_hash,
                authorization,
            }
        }))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(volunteer::Entity::find().count(&self.db).await?)
    }

    async fn create(&self, v: NewVolunteer) -> DomainResult<Volunteer> {
        debug!("Creating volunteer: {}", v.email);

        let email = v.email.clone();
        let model = volunteer::ActiveModel {
            email: Set(v.email),
            name: Set(v.name),
            pep_id: Set(v.pep_id),
            password_hash: Set(None),
            authorization: Set(None),
            birth_date: Set(v.birth_date),
            phone_number: Set(v.phone_number),
            country: Set(v.country),
            state: Set(v.state),
            city: Set(v.city),
            disability: Set(v.disability),
            how_found_pep: Set(v.how_found_pep),
            knowledge_pep: Set(v.knowledge_pep),
            workshops: Set(encode_list(&v.workshops)),
            schooling: Set(v.schooling),
            bachelor: Set(v.bachelor),
            studies_knowledge: Set(v.studies_knowledge),
            life_experience: Set(v.life_experience),
            desires: Set(v.desires),
            roles_pep: Set(encode_list(&v.roles_pep)),
            interest_future_roles: Set(encode_list(&v.interest_future_roles)),
            need_declaration: Set(v.need_declaration),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(m) => Ok(model_to_domain(m)),
            Err(e) if is_unique_violation(&e) => Err(DomainError::conflict(
                "VOLUNTEER_ALREADY_EXISTS",
                format!("Volunteer with email {} already exists", email),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(
        &self,
        email: &str,
        changes: VolunteerChanges,
        has_class: bool,
    ) -> DomainResult<Option<Volunteer>> {
        debug!("Updating volunteer: {} (has_class: {})", email, has_class);

        let lookup_email = changes.email.clone().unwrap_or_else(|| email.to_string());
        let active = changes_to_active(changes, has_class);

        if active.is_changed() {
            let result = volunteer::Entity::update_many()
                .set(active)
                .filter(volunteer::Column::Email.eq(email))
                .exec(&self.db)
                .await;

            match result {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(DomainError::conflict(
                        "VOLUNTEER_NOT_UPDATED",
                        format!("Volunteer with email {} not updated", email),
                    ))
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.find_by_email(&lookup_email).await
    }

    async fn delete_by_email(&self, email: &str) -> DomainResult<bool> {
        debug!("Deleting volunteer: {}", email);
        let result = volunteer::Entity::delete_many()
            .filter(volunteer::Column::Email.eq(email))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn set_password_for_email(&self, email: &str, password_hash: &str) -> DomainResult<bool> {
        let result = volunteer::Entity::update_many()
            .col_expr(volunteer::Column::PasswordHash, Expr::value(password_hash))
            .filter(volunteer::Column::Email.eq(email))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_permission_by_name(&self, name: &str) -> DomainResult<Option<PermissionProfile>> {
        let model = authorization::Entity::find()
            .filter(authorization::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(profile_to_domain))
    }

    async fn save_permission(&self, profile: PermissionProfile) -> DomainResult<()> {
        debug!("Saving authorization profile: {}", profile.name);

        let existing = authorization::Entity::find()
            .filter(authorization::Column::Name.eq(profile.name.as_str()))
            .one(&self.db)
            .await?;

        let mut active: authorization::ActiveModel = match existing {
            Some(m) => m.into(),
            None => authorization::ActiveModel {
                name: Set(profile.name.clone()),
                ..Default::default()
            },
        };
        active.read_permission = Set(profile.read);
        active.attendance_module_permission = Set(profile.attendance_module);
        active.manage_volunteer_module_permission = Set(profile.manage_volunteer_module);
        active.notebook_module_permission = Set(profile.notebook_module);
        active.save(&self.db).await?;
        Ok(())
    }

    async fn post_hours(&self, hours: NewVolunteerHours) -> DomainResult<VolunteerHours> {
        let model = volunteer_hours::ActiveModel {
            volunteer_id: Set(hours.volunteer_id),
            hours: Set(hours.hours),
            description: Set(hours.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(hours_to_domain(model))
    }

    async fn find_hours_by_month(
        &self,
        volunteer_id: i32,
        month: u32,
        year: i32,
    ) -> DomainResult<Option<VolunteerHours>> {
        let start = month_start(year, month).ok_or_else(|| {
            DomainError::Validation(format!("Invalid month {}/{}", month, year))
        })?;

        let model = volunteer_hours::Entity::find()
            .filter(volunteer_hours::Column::VolunteerId.eq(volunteer_id))
            .filter(volunteer_hours::Column::CreatedAt.gt(start))
            .order_by_asc(volunteer_hours::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(model.map(hours_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use crate::infrastructure::database::repositories::test_support::{
        day, new_volunteer, setup_db,
    };
    use crate::shared::FilterValue;

    async fn backdate(db: &DatabaseConnection, email: &str, at: DateTime<Utc>) {
        volunteer::Entity::update_many()
            .col_expr(volunteer::Column::CreatedAt, Expr::value(at))
            .filter(volunteer::Column::Email.eq(email))
            .exec(db)
            .await
            .unwrap();
    }

    async fn backdate_hours(db: &DatabaseConnection, id: i32, at: DateTime<Utc>) {
        volunteer_hours::Entity::update_many()
            .col_expr(volunteer_hours::Column::CreatedAt, Expr::value(at))
            .filter(volunteer_hours::Column::Id.eq(id))
            .exec(db)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);

        let created = repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();
        assert_eq!(created.workshops, vec!["Leitura".to_string()]);

        let by_email = repo.find_by_email("ana@pep.org").await.unwrap().unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_email, by_id);
        assert!(repo.find_by_email("nobody@pep.org").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        let err = repo
            .create(new_volunteer("ana@pep.org", "Outra Ana"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VOLUNTEER_ALREADY_EXISTS");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_from_date_pages_and_counts() {
        let db = setup_db().await;
        let repo = SeaOrmVolunteerRepository::new(db.clone());

        for i in 0..25 {
            repo.create(new_volunteer(&format!("v{i}@pep.org"), "Vol"))
                .await
                .unwrap();
        }
        repo.create(new_volunteer("old@pep.org", "Old")).await.unwrap();
        backdate(&db, "old@pep.org", day(2020, 1, 1)).await;

        let params = PaginationParams::new(2, 10);
        let page = repo.fetch_from_date(&params, day(2023, 1, 1)).await.unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);

        let last = repo
            .fetch_from_date(&PaginationParams::new(3, 10), day(2023, 1, 1))
            .await
            .unwrap();
        assert_eq!(last.data.len(), 5);

        let everyone = repo
            .fetch_from_date(&PaginationParams::new(1, 10), day(2019, 1, 1))
            .await
            .unwrap();
        assert_eq!(everyone.total_count, 26);
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        for i in 0..35 {
            repo.create(new_volunteer(&format!("v{i}@pep.org"), "Vol"))
                .await
                .unwrap();
        }

        let params = PaginationParams::from_query([("limit", "100")]);
        let page = repo.fetch_from_date(&params, day(2000, 1, 1)).await.unwrap();
        assert_eq!(page.data.len(), 30);
        assert_eq!(page.total_count, 35);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        for i in 0..3 {
            repo.create(new_volunteer(&format!("v{i}@pep.org"), "Vol"))
                .await
                .unwrap();
        }

        let params =
            PaginationParams::from_query([("page", "9223372036854775807"), ("limit", "30")]);
        let page = repo.fetch_from_date(&params, day(2000, 1, 1)).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn field_filters_merge_with_date() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("a@pep.org", "A")).await.unwrap();
        let mut olinda = new_volunteer("b@pep.org", "B");
        olinda.city = "Olinda".into();
        repo.create(olinda).await.unwrap();

        let params = PaginationParams::default()
            .with_filter("city", FilterValue::One("Olinda".into()))
            .with_filter("unknown_column", FilterValue::One("x".into()));
        let page = repo.fetch_from_date(&params, day(2000, 1, 1)).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.data[0].email, "b@pep.org");
    }

    #[tokio::test]
    async fn repeated_fetch_is_stable() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        for i in 0..12 {
            repo.create(new_volunteer(&format!("v{i}@pep.org"), "Vol"))
                .await
                .unwrap();
        }

        let params = PaginationParams::new(2, 5);
        let first = repo.fetch_from_date(&params, day(2000, 1, 1)).await.unwrap();
        let second = repo.fetch_from_date(&params, day(2000, 1, 1)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn update_changes_fields_and_follows_new_email() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        let changes = VolunteerChanges {
            email: Some("ana.silva@pep.org".into()),
            city: Some("Caruaru".into()),
            roles_pep: Some(vec!["Mediador".into()]),
            ..Default::default()
        };
        let updated = repo
            .update("ana@pep.org", changes, false)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "ana.silva@pep.org");
        assert_eq!(updated.city, "Caruaru");
        assert_eq!(updated.roles_pep, vec!["Mediador".to_string()]);
        assert!(repo.find_by_email("ana@pep.org").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_with_class_clears_assignment() {
        let db = setup_db().await;
        let repo = SeaOrmVolunteerRepository::new(db.clone());
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();
        backdate(&db, "ana@pep.org", day(2020, 1, 1)).await;

        let changes = VolunteerChanges {
            pep_id: Some(4),
            ..Default::default()
        };
        let updated = repo
            .update("ana@pep.org", changes, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.pep_id, None);
        assert!(updated.created_at > day(2020, 1, 2));
    }

    #[tokio::test]
    async fn update_to_taken_email_fails() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();
        repo.create(new_volunteer("bia@pep.org", "Bia")).await.unwrap();

        let changes = VolunteerChanges {
            email: Some("bia@pep.org".into()),
            ..Default::default()
        };
        let err = repo.update("ana@pep.org", changes, false).await.unwrap_err();
        assert_eq!(err.code(), "VOLUNTEER_NOT_UPDATED");
    }

    #[tokio::test]
    async fn empty_update_returns_current_record() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        let created = repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        let same = repo
            .update("ana@pep.org", VolunteerChanges::default(), false)
            .await
            .unwrap();
        assert_eq!(same, Some(created));
        assert!(repo
            .update("ghost@pep.org", VolunteerChanges::default(), false)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn password_and_auth_lookup() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        assert!(repo.set_password_for_email("ana@pep.org", "hash").await.unwrap());
        assert!(!repo.set_password_for_email("ghost@pep.org", "hash").await.unwrap());

        let with_auth = repo
            .find_with_auth_by_email("ana@pep.org")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(with_auth.password_hash.as_deref(), Some("hash"));
        assert_eq!(with_auth.authorization, None);
    }

    #[tokio::test]
    async fn delete_by_email_reports_removal() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        assert!(repo.delete_by_email("ana@pep.org").await.unwrap());
        assert!(!repo.delete_by_email("ana@pep.org").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn permission_profiles_upsert_by_name() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        repo.save_permission(PermissionProfile::full("admin"))
            .await
            .unwrap();

        let mut restricted = PermissionProfile::full("admin");
        restricted.notebook_module = false;
        repo.save_permission(restricted.clone()).await.unwrap();

        assert_eq!(
            repo.find_permission_by_name("admin").await.unwrap(),
            Some(restricted)
        );
        assert!(repo.find_permission_by_name("guest").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hours_are_found_after_month_start() {
        let repo = SeaOrmVolunteerRepository::new(setup_db().await);
        let ana = repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();

        let posted = repo
            .post_hours(NewVolunteerHours {
                volunteer_id: ana.id,
                hours: 4.5,
                description: Some("Correção de cadernos".into()),
            })
            .await
            .unwrap();

        let now = Utc::now();
        let found = repo
            .find_hours_by_month(ana.id, now.month0(), now.year())
            .await
            .unwrap();
        assert_eq!(found, Some(posted));

        let future = repo
            .find_hours_by_month(ana.id, 0, now.year() + 1)
            .await
            .unwrap();
        assert!(future.is_none());

        let err = repo.find_hours_by_month(ana.id, 12, 2024).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn hours_lookup_takes_zero_based_month_and_skips_the_boundary() {
        let db = setup_db().await;
        let repo = SeaOrmVolunteerRepository::new(db.clone());
        let ana = repo.create(new_volunteer("ana@pep.org", "Ana")).await.unwrap();
        let posted = repo
            .post_hours(NewVolunteerHours {
                volunteer_id: ana.id,
                hours: 2.0,
                description: None,
            })
            .await
            .unwrap();

        backdate_hours(&db, posted.id, day(2024, 1, 15)).await;
        let january = repo.find_hours_by_month(ana.id, 0, 2024).await.unwrap();
        assert_eq!(january.map(|h| h.id), Some(posted.id));

        // exactly at midnight of the first day is not after the start
        backdate_hours(&db, posted.id, day(2024, 2, 1)).await;
        assert!(repo
            .find_hours_by_month(ana.id, 1, 2024)
            .await
            .unwrap()
            .is_none());
    }
}
