//! SeaORM implementation of AttendanceRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::query::{apply_filters, apply_sort, fetch_page, Field, FieldKind};
use super::{is_foreign_key_violation, is_unique_violation};
use crate::domain::attendance::{
    Attendance, AttendanceInfo, AttendanceRepository, NewAttendance, VolunteerAttendanceMetrics,
    WorkshopAttendanceRow,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{attendance, notebook, volunteer, workshop};
use crate::shared::{wrap_pagination, PaginationParams, PaginationResult};

pub struct SeaOrmAttendanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmAttendanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Row shapes ──────────────────────────────────────────────────

#[derive(Debug, FromQueryResult)]
struct AttendanceInfoRow {
    id: i32,
    volunteer_id: i32,
    volunteer_name: String,
    volunteer_email: String,
    workshop_id: i32,
    workshop_name: String,
    created_at: DateTime<Utc>,
}

impl From<AttendanceInfoRow> for AttendanceInfo {
    fn from(r: AttendanceInfoRow) -> Self {
        Self {
            id: r.id,
            volunteer_id: r.volunteer_id,
            volunteer_name: r.volunteer_name,
            volunteer_email: r.volunteer_email,
            workshop_id: r.workshop_id,
            workshop_name: r.workshop_name,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct WorkshopRow {
    workshop_id: i32,
    workshop_name: String,
    attended_at: DateTime<Utc>,
}

fn info_field(name: &str) -> Option<Field> {
    let field = match name {
        "id" => Field::of(attendance::Column::Id, FieldKind::Int),
        "volunteer_id" => Field::of(attendance::Column::VolunteerId, FieldKind::Int),
        "workshop_id" => Field::of(attendance::Column::WorkshopId, FieldKind::Int),
        "volunteer_name" => Field::of(volunteer::Column::Name, FieldKind::Text),
        "volunteer_email" | "email" => Field::of(volunteer::Column::Email, FieldKind::Text),
        "workshop_name" => Field::of(workshop::Column::Name, FieldKind::Text),
        _ => return None,
    };
    Some(field)
}

fn info_sort_field(name: &str) -> Option<Field> {
    match name {
        "created_at" => Some(Field::of(attendance::Column::CreatedAt, FieldKind::Text)),
        other => info_field(other),
    }
}

fn metrics_field(name: &str) -> Option<Field> {
    use volunteer::Column;
    let field = match name {
        "volunteer_id" | "id" => Field::of(Column::Id, FieldKind::Int),
        "pep_id" => Field::of(Column::PepId, FieldKind::Int),
        "name" => Field::of(Column::Name, FieldKind::Text),
        "email" => Field::of(Column::Email, FieldKind::Text),
        "city" => Field::of(Column::City, FieldKind::Text),
        "state" => Field::of(Column::State, FieldKind::Text),
        "country" => Field::of(Column::Country, FieldKind::Text),
        _ => return None,
    };
    Some(field)
}

/// Attendances created since `since`, joined with volunteer and workshop.
fn info_select(since: DateTime<Utc>) -> Select<attendance::Entity> {
    attendance::Entity::find()
        .select_only()
        .column(attendance::Column::Id)
        .column(attendance::Column::VolunteerId)
        .column_as(volunteer::Column::Name, "volunteer_name")
        .column_as(volunteer::Column::Email, "volunteer_email")
        .column(attendance::Column::WorkshopId)
        .column_as(workshop::Column::Name, "workshop_name")
        .column(attendance::Column::CreatedAt)
        .join(JoinType::InnerJoin, attendance::Relation::Volunteer.def())
        .join(JoinType::InnerJoin, attendance::Relation::Workshop.def())
        .filter(attendance::Column::CreatedAt.gte(since))
}

impl SeaOrmAttendanceRepository {
    /// Attach attendance and evaluated-notebook counts to each volunteer.
    ///
    /// With `scoped` set the grouped counts are limited to the given
    /// volunteers, otherwise they are computed for everyone.
    async fn with_counts(
        &self,
        volunteers: Vec<volunteer::Model>,
        scoped: bool,
    ) -> DomainResult<Vec<VolunteerAttendanceMetrics>> {
        if volunteers.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = volunteers.iter().map(|v| v.id).collect();

        let mut attendances = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::VolunteerId)
            .column_as(
                Expr::col((attendance::Entity, attendance::Column::Id)).count(),
                "total",
            )
            .group_by(attendance::Column::VolunteerId);
        if scoped {
            attendances = attendances.filter(attendance::Column::VolunteerId.is_in(ids.clone()));
        }
        let attendances: HashMap<i32, i64> = attendances
            .into_tuple::<(i32, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let mut evaluated = notebook::Entity::find()
            .select_only()
            .column(notebook::Column::VolunteerId)
            .column_as(
                Expr::col((notebook::Entity, notebook::Column::Id)).count(),
                "total",
            )
            .filter(notebook::Column::VolunteerId.is_not_null())
            .filter(notebook::Column::EvaluatedAt.is_not_null())
            .group_by(notebook::Column::VolunteerId);
        if scoped {
            evaluated = evaluated.filter(notebook::Column::VolunteerId.is_in(ids));
        }
        let evaluated: HashMap<i32, i64> = evaluated
            .into_tuple::<(i32, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(volunteers
            .into_iter()
            .map(|v| VolunteerAttendanceMetrics {
                attendances: attendances.get(&v.id).copied().unwrap_or(0) as u64,
                evaluated_notebooks: evaluated.get(&v.id).copied().unwrap_or(0) as u64,
                volunteer_id: v.id,
                name: v.name,
                email: v.email,
                city: v.city,
                state: v.state,
            })
            .collect())
    }
}

// ── AttendanceRepository impl ───────────────────────────────────

#[async_trait]
impl AttendanceRepository for SeaOrmAttendanceRepository {
    async fn fetch_from_date(
        &self,
        params: &PaginationParams,
        since: DateTime<Utc>,
    ) -> DomainResult<PaginationResult<AttendanceInfo>> {
        debug!("Fetching attendances since {}", since);

        let select = apply_filters(info_select(since), &params.filter, info_field);
        let select = apply_sort(select, &params.sort, info_sort_field)
            .order_by_desc(attendance::Column::CreatedAt)
            .order_by_desc(attendance::Column::Id);

        let page = wrap_pagination(params, move || async move {
            let (rows, total) = fetch_page::<_, AttendanceInfoRow>(&self.db, select, params).await?;
            Ok::<_, DomainError>((rows.into_iter().map(Into::into).collect(), total))
        })
        .await?;
        Ok(page)
    }

    async fn find_from_date(&self, since: DateTime<Utc>) -> DomainResult<Vec<AttendanceInfo>> {
        let rows = info_select(since)
            .order_by_desc(attendance::Column::CreatedAt)
            .order_by_desc(attendance::Column::Id)
            .into_model::<AttendanceInfoRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn fetch_metrics(
        &self,
        params: &PaginationParams,
    ) -> DomainResult<PaginationResult<VolunteerAttendanceMetrics>> {
        let select = apply_filters(volunteer::Entity::find(), &params.filter, metrics_field);
        let select = apply_sort(select, &params.sort, metrics_field)
            .order_by_asc(volunteer::Column::Name)
            .order_by_asc(volunteer::Column::Id);

        let page = wrap_pagination(params, move || async move {
            let (volunteers, total) =
                fetch_page::<_, volunteer::Model>(&self.db, select, params).await?;
            let metrics = self.with_counts(volunteers, true).await?;
            Ok::<_, DomainError>((metrics, total))
        })
        .await?;
        Ok(page)
    }

    async fn find_metrics(&self) -> DomainResult<Vec<VolunteerAttendanceMetrics>> {
        let volunteers = volunteer::Entity::find()
            .order_by_asc(volunteer::Column::Name)
            .order_by_asc(volunteer::Column::Id)
            .all(&self.db)
            .await?;
        self.with_counts(volunteers, false).await
    }

    async fn find_by_volunteer(
        &self,
        volunteer_id: i32,
    ) -> DomainResult<Vec<WorkshopAttendanceRow>> {
        let rows = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::WorkshopId)
            .column_as(workshop::Column::Name, "workshop_name")
            .column_as(attendance::Column::CreatedAt, "attended_at")
            .join(JoinType::InnerJoin, attendance::Relation::Workshop.def())
            .filter(attendance::Column::VolunteerId.eq(volunteer_id))
            .order_by_asc(attendance::Column::CreatedAt)
            .into_model::<WorkshopRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| WorkshopAttendanceRow {
                workshop_id: r.workshop_id,
                workshop_name: r.workshop_name,
                attended_at: r.attended_at,
            })
            .collect())
    }

    async fn submit(&self, new: NewAttendance) -> DomainResult<Attendance> {
        debug!(
            "Submitting attendance: volunteer {} workshop {}",
            new.volunteer_id, new.workshop_id
        );

        if volunteer::Entity::find_by_id(new.volunteer_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Volunteer", "id", new.volunteer_id));
        }
        if workshop::Entity::find_by_id(new.workshop_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Workshop", "id", new.workshop_id));
        }

        let model = attendance::ActiveModel {
            volunteer_id: Set(new.volunteer_id),
            workshop_id: Set(new.workshop_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(m) => Ok(Attendance {
                id: m.id,
                volunteer_id: m.volunteer_id,
                workshop_id: m.workshop_id,
                created_at: m.created_at,
            }),
            Err(e) if is_unique_violation(&e) => Err(DomainError::conflict(
                "ATTENDANCE_ALREADY_SUBMITTED",
                format!(
                    "Attendance of volunteer {} at workshop {} already submitted",
                    new.volunteer_id, new.workshop_id
                ),
            )),
            // Workshop removed between the lookup and the insert
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DomainError::not_found("Workshop", "id", new.workshop_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notebook::{NotebookEvaluation, NotebookRepository};
    use crate::domain::volunteer::VolunteerRepository;
    use crate::infrastructure::database::repositories::notebook_repository::SeaOrmNotebookRepository;
    use crate::infrastructure::database::repositories::test_support::{
        day, insert_notebook, insert_workshop, new_volunteer, setup_db,
    };
    use crate::infrastructure::database::repositories::volunteer_repository::SeaOrmVolunteerRepository;
    use crate::shared::FilterValue;

    async fn create_volunteer(db: &DatabaseConnection, email: &str, name: &str) -> i32 {
        SeaOrmVolunteerRepository::new(db.clone())
            .create(new_volunteer(email, name))
            .await
            .unwrap()
            .id
    }

    fn attend(volunteer_id: i32, workshop_id: i32) -> NewAttendance {
        NewAttendance {
            volunteer_id,
            workshop_id,
        }
    }

    #[tokio::test]
    async fn submit_and_list_for_volunteer() {
        let db = setup_db().await;
        let repo = SeaOrmAttendanceRepository::new(db.clone());
        let ana = create_volunteer(&db, "ana@pep.org", "Ana").await;
        let intro = insert_workshop(&db, "Introdução").await;
        let reading = insert_workshop(&db, "Leitura").await;

        repo.submit(attend(ana, intro)).await.unwrap();
        repo.submit(attend(ana, reading)).await.unwrap();

        let rows = repo.find_by_volunteer(ana).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.workshop_name.as_str()).collect();
        assert_eq!(names, vec!["Introdução", "Leitura"]);
    }

    #[tokio::test]
    async fn duplicate_attendance_is_rejected() {
        let db = setup_db().await;
        let repo = SeaOrmAttendanceRepository::new(db.clone());
        let ana = create_volunteer(&db, "ana@pep.org", "Ana").await;
        let intro = insert_workshop(&db, "Introdução").await;

        repo.submit(attend(ana, intro)).await.unwrap();
        let err = repo.submit(attend(ana, intro)).await.unwrap_err();
        assert_eq!(err.code(), "ATTENDANCE_ALREADY_SUBMITTED");
        assert_eq!(repo.find_by_volunteer(ana).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_volunteer_or_workshop() {
        let db = setup_db().await;
        let repo = SeaOrmAttendanceRepository::new(db.clone());
        let ana = create_volunteer(&db, "ana@pep.org", "Ana").await;
        let intro = insert_workshop(&db, "Introdução").await;

        let err = repo.submit(attend(999, intro)).await.unwrap_err();
        assert_eq!(err.code(), "VOLUNTEER_NOT_FOUND");

        let err = repo.submit(attend(ana, 999)).await.unwrap_err();
        assert_eq!(err.code(), "WORKSHOP_NOT_FOUND");
    }

    #[tokio::test]
    async fn fetch_from_date_joins_names() {
        let db = setup_db().await;
        let repo = SeaOrmAttendanceRepository::new(db.clone());
        let ana = create_volunteer(&db, "ana@pep.org", "Ana").await;
        let bia = create_volunteer(&db, "bia@pep.org", "Bia").await;
        let intro = insert_workshop(&db, "Introdução").await;
        repo.submit(attend(ana, intro)).await.unwrap();
        repo.submit(attend(bia, intro)).await.unwrap();

        let params = PaginationParams::default()
            .with_filter("volunteer_email", FilterValue::One("bia@pep.org".into()));
        let page = repo.fetch_from_date(&params, day(2020, 1, 1)).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.data[0].volunteer_name, "Bia");
        assert_eq!(page.data[0].workshop_name, "Introdução");

        let all = repo.find_from_date(day(2020, 1, 1)).await.unwrap();
        assert_eq!(all.len(), 2);
        let none = repo
            .find_from_date(Utc::now() + chrono::Duration::days(1))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn metrics_count_attendances_and_evaluations() {
        let db = setup_db().await;
        let repo = SeaOrmAttendanceRepository::new(db.clone());
        let notebooks = SeaOrmNotebookRepository::new(db.clone());
        let ana = create_volunteer(&db, "ana@pep.org", "Ana").await;
        let bia = create_volunteer(&db, "bia@pep.org", "Bia").await;
        create_volunteer(&db, "caio@pep.org", "Caio").await;
        let intro = insert_workshop(&db, "Introdução").await;
        let reading = insert_workshop(&db, "Leitura").await;

        repo.submit(attend(ana, intro)).await.unwrap();
        repo.submit(attend(ana, reading)).await.unwrap();
        repo.submit(attend(bia, intro)).await.unwrap();

        let nb = insert_notebook(&db, None, true).await;
        notebooks.reserve(bia, nb).await.unwrap();
        notebooks
            .save_evaluation(
                nb,
                NotebookEvaluation {
                    evaluator_name: "Bia".into(),
                    conclusion: "Aprovado".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = repo.find_metrics().await.unwrap();
        let summary: Vec<_> = all
            .iter()
            .map(|m| (m.name.as_str(), m.attendances, m.evaluated_notebooks))
            .collect();
        assert_eq!(
            summary,
            vec![("Ana", 2, 0), ("Bia", 1, 1), ("Caio", 0, 0)]
        );

        let page = repo
            .fetch_metrics(&PaginationParams::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Caio");
    }
}
