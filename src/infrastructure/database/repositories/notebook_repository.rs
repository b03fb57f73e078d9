//! SeaORM implementation of NotebookRepository
//!
//! Reservation, revert and evaluation are single `UPDATE … WHERE <guard>`
//! statements followed by a re-read; a guard that matches nothing leaves
//! the row untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::query::{apply_filters, apply_sort, fetch_page, Field, FieldKind};
use super::{decode_list, encode_list};
use crate::domain::notebook::{
    Notebook, NotebookChanges, NotebookEvaluation, NotebookEvaluationRow, NotebookRepository,
    Reflection,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{notebook, pep_class, place, volunteer};
use crate::shared::{wrap_pagination, PaginationParams, PaginationResult};

pub struct SeaOrmNotebookRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotebookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The reservation `UPDATE`; returns how many rows the guard matched.
    async fn claim(&self, volunteer_id: i32, id: i32) -> DomainResult<u64> {
        use notebook::Column;

        let result = notebook::Entity::update_many()
            .col_expr(Column::VolunteerId, Expr::value(volunteer_id))
            .col_expr(Column::ReservedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::VolunteerId.is_null())
            .filter(Column::ReservedAt.is_null())
            .filter(Column::EvaluatedAt.is_null())
            .filter(Column::Approved.eq(true))
            .exec(&self.db)
            .await?;
        debug!(
            "Reserve notebook {} for volunteer {}: {} row(s) updated",
            id, volunteer_id, result.rows_affected
        );
        Ok(result.rows_affected)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: notebook::Model, class: Option<pep_class::Model>) -> Notebook {
    Notebook {
        id: m.id,
        volunteer_id: m.volunteer_id,
        pep_id: m.pep_id,
        student_name: m.student_name,
        student_registration: m.student_registration,
        student_prison_unit: m.student_prison_unit,
        evaluator_name: m.evaluator_name,
        evaluator_email: m.evaluator_email,
        subjects: decode_list(&m.subjects),
        answers: decode_list(&m.answers),
        relevant_content: m.relevant_content,
        conclusion: m.conclusion,
        approved: m.approved,
        archives_exclusion: m.archives_exclusion,
        reserved_at: m.reserved_at,
        evaluated_at: m.evaluated_at,
        created_at: m.created_at,
        notebook_directory: class.and_then(|c| c.notebook_directory),
    }
}

/// Evaluation listing row with the joined volunteer and place names
#[derive(Debug, FromQueryResult)]
struct EvaluationListRow {
    id: i32,
    pep_id: Option<i32>,
    place_name: Option<String>,
    volunteer_id: Option<i32>,
    volunteer_name: Option<String>,
    student_name: String,
    student_registration: Option<String>,
    student_prison_unit: Option<String>,
    evaluator_name: Option<String>,
    evaluator_email: Option<String>,
    conclusion: Option<String>,
    approved: bool,
    archives_exclusion: bool,
    reserved_at: Option<DateTime<Utc>>,
    evaluated_at: Option<DateTime<Utc>>,
}

impl From<EvaluationListRow> for NotebookEvaluationRow {
    fn from(r: EvaluationListRow) -> Self {
        Self {
            id: r.id,
            pep_id: r.pep_id,
            place_name: r.place_name,
            volunteer_id: r.volunteer_id,
            volunteer_name: r.volunteer_name,
            student_name: r.student_name,
            student_registration: r.student_registration,
            student_prison_unit: r.student_prison_unit,
            evaluator_name: r.evaluator_name,
            evaluator_email: r.evaluator_email,
            conclusion: r.conclusion,
            approved: r.approved,
            archives_exclusion: r.archives_exclusion,
            reserved_at: r.reserved_at,
            evaluated_at: r.evaluated_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct ReflectionRow {
    student_name: String,
    student_registration: Option<String>,
    student_prison_unit: Option<String>,
    relevant_content: String,
}

fn evaluation_field(name: &str) -> Option<Field> {
    use notebook::Column;
    let field = match name {
        "classes" | "pep_id" => Field::of(Column::PepId, FieldKind::Int),
        "id" => Field::of(Column::Id, FieldKind::Int),
        "volunteer_id" => Field::of(Column::VolunteerId, FieldKind::Int),
        "approved" => Field::of(Column::Approved, FieldKind::Bool),
        "archives_exclusion" => Field::of(Column::ArchivesExclusion, FieldKind::Bool),
        "student_name" => Field::of(Column::StudentName, FieldKind::Text),
        "student_registration" => Field::of(Column::StudentRegistration, FieldKind::Text),
        "student_prison_unit" => Field::of(Column::StudentPrisonUnit, FieldKind::Text),
        "evaluator_name" => Field::of(Column::EvaluatorName, FieldKind::Text),
        "evaluator_email" => Field::of(Column::EvaluatorEmail, FieldKind::Text),
        "place_name" => Field::of(place::Column::FullName, FieldKind::Text),
        "volunteer_name" => Field::of(volunteer::Column::Name, FieldKind::Text),
        _ => return None,
    };
    Some(field)
}

fn evaluation_sort_field(name: &str) -> Option<Field> {
    use notebook::Column;
    match name {
        "reserved_at" => Some(Field::of(Column::ReservedAt, FieldKind::Text)),
        "evaluated_at" => Some(Field::of(Column::EvaluatedAt, FieldKind::Text)),
        "created_at" => Some(Field::of(Column::CreatedAt, FieldKind::Text)),
        other => evaluation_field(other),
    }
}

/// Notebooks joined with volunteer, class and place; newest first.
fn evaluation_select(params: &PaginationParams) -> Select<notebook::Entity> {
    use notebook::Column;

    let select = notebook::Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::PepId)
        .column_as(place::Column::FullName, "place_name")
        .column(Column::VolunteerId)
        .column_as(volunteer::Column::Name, "volunteer_name")
        .columns([
            Column::StudentName,
            Column::StudentRegistration,
            Column::StudentPrisonUnit,
            Column::EvaluatorName,
            Column::EvaluatorEmail,
            Column::Conclusion,
            Column::Approved,
            Column::ArchivesExclusion,
            Column::ReservedAt,
            Column::EvaluatedAt,
        ])
        .join(JoinType::LeftJoin, notebook::Relation::Volunteer.def())
        .join(JoinType::LeftJoin, notebook::Relation::PepClass.def())
        .join(JoinType::LeftJoin, pep_class::Relation::Place.def());

    let select = apply_filters(select, &params.filter, evaluation_field);
    apply_sort(select, &params.sort, evaluation_sort_field)
        .order_by_desc(Column::Id)
        .order_by_desc(Column::EvaluatedAt)
}

fn changes_to_active(changes: NotebookChanges) -> notebook::ActiveModel {
    let mut active = <notebook::ActiveModel as Default>::default();
    if let Some(v) = changes.pep_id {
        active.pep_id = Set(Some(v));
    }
    if let Some(v) = changes.student_name {
        active.student_name = Set(v);
    }
    if let Some(v) = changes.student_registration {
        active.student_registration = Set(Some(v));
    }
    if let Some(v) = changes.student_prison_unit {
        active.student_prison_unit = Set(Some(v));
    }
    if let Some(v) = changes.approved {
        active.approved = Set(v);
    }
    if let Some(v) = changes.conclusion {
        active.conclusion = Set(Some(v));
    }
    active
}

// ── NotebookRepository impl ─────────────────────────────────────

#[async_trait]
impl NotebookRepository for SeaOrmNotebookRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Notebook>> {
        let found = notebook::Entity::find_by_id(id)
            .find_also_related(pep_class::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(|(m, class)| model_to_domain(m, class)))
    }

    async fn reserve(&self, volunteer_id: i32, id: i32) -> DomainResult<Option<Notebook>> {
        self.claim(volunteer_id, id).await?;
        self.find_by_id(id).await
    }

    async fn revert_reservation(&self, id: i32) -> DomainResult<Option<Notebook>> {
        use notebook::Column;

        let result = notebook::Entity::update_many()
            .col_expr(Column::VolunteerId, Expr::value(Option::<i32>::None))
            .col_expr(Column::ReservedAt, Expr::value(Option::<DateTime<Utc>>::None))
            .filter(Column::Id.eq(id))
            .filter(Column::VolunteerId.is_not_null())
            .filter(Column::ReservedAt.is_not_null())
            .exec(&self.db)
            .await?;
        debug!(
            "Revert reservation of notebook {}: {} row(s) updated",
            id, result.rows_affected
        );

        self.find_by_id(id).await
    }

    async fn save_evaluation(
        &self,
        id: i32,
        evaluation: NotebookEvaluation,
    ) -> DomainResult<Option<Notebook>> {
        use notebook::Column;

        let result = notebook::Entity::update_many()
            .col_expr(Column::EvaluatorName, Expr::value(evaluation.evaluator_name))
            .col_expr(Column::EvaluatorEmail, Expr::value(evaluation.evaluator_email))
            .col_expr(Column::Subjects, Expr::value(encode_list(&evaluation.subjects)))
            .col_expr(Column::Answers, Expr::value(encode_list(&evaluation.answers)))
            .col_expr(Column::RelevantContent, Expr::value(evaluation.relevant_content))
            .col_expr(Column::Conclusion, Expr::value(evaluation.conclusion))
            .col_expr(
                Column::ArchivesExclusion,
                Expr::value(evaluation.archives_exclusion),
            )
            .col_expr(Column::EvaluatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::EvaluatedAt.is_null())
            .exec(&self.db)
            .await?;
        debug!(
            "Save evaluation of notebook {}: {} row(s) updated",
            id, result.rows_affected
        );

        self.find_by_id(id).await
    }

    async fn update(&self, id: i32, changes: NotebookChanges) -> DomainResult<Option<Notebook>> {
        let active = changes_to_active(changes);
        if active.is_changed() {
            notebook::Entity::update_many()
                .set(active)
                .filter(notebook::Column::Id.eq(id))
                .exec(&self.db)
                .await?;
        }
        self.find_by_id(id).await
    }

    async fn find_reserved_by_volunteer(&self, volunteer_id: i32) -> DomainResult<Vec<Notebook>> {
        use notebook::Column;

        let found = notebook::Entity::find()
            .find_also_related(pep_class::Entity)
            .filter(Column::VolunteerId.eq(volunteer_id))
            .filter(Column::EvaluatedAt.is_null())
            .filter(Column::Approved.eq(true))
            .filter(Column::PepId.is_not_null())
            .order_by_asc(Column::ReservedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .map(|(m, class)| model_to_domain(m, class))
            .collect())
    }

    async fn find_available(&self) -> DomainResult<Vec<Notebook>> {
        use notebook::Column;

        let found = notebook::Entity::find()
            .find_also_related(pep_class::Entity)
            .filter(Column::VolunteerId.is_null())
            .filter(Column::ReservedAt.is_null())
            .filter(Column::EvaluatedAt.is_null())
            .filter(Column::Approved.eq(true))
            .filter(Column::PepId.is_not_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .map(|(m, class)| model_to_domain(m, class))
            .collect())
    }

    async fn count_evaluated_by_volunteer(&self, volunteer_id: i32) -> DomainResult<u64> {
        let count = notebook::Entity::find()
            .filter(notebook::Column::VolunteerId.eq(volunteer_id))
            .filter(notebook::Column::EvaluatedAt.is_not_null())
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn fetch_evaluations(
        &self,
        params: &PaginationParams,
    ) -> DomainResult<PaginationResult<NotebookEvaluationRow>> {
        let select = evaluation_select(params);

        let page = wrap_pagination(params, move || async move {
            let (rows, total) = fetch_page::<_, EvaluationListRow>(&self.db, select, params).await?;
            Ok::<_, DomainError>((rows.into_iter().map(Into::into).collect(), total))
        })
        .await?;
        Ok(page)
    }

    async fn find_evaluations(
        &self,
        params: &PaginationParams,
    ) -> DomainResult<Vec<NotebookEvaluationRow>> {
        let rows = evaluation_select(params)
            .into_model::<EvaluationListRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_reflections(&self, since: DateTime<Utc>) -> DomainResult<Vec<Reflection>> {
        use notebook::Column;

        let rows = notebook::Entity::find()
            .select_only()
            .columns([
                Column::StudentName,
                Column::StudentRegistration,
                Column::StudentPrisonUnit,
                Column::RelevantContent,
            ])
            .filter(Column::EvaluatedAt.gt(since))
            .filter(Column::RelevantContent.is_not_null())
            .order_by_asc(Column::EvaluatedAt)
            .into_model::<ReflectionRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Reflection {
                student_name: r.student_name,
                student_registration: r.student_registration,
                student_prison_unit: r.student_prison_unit,
                relevant_content: r.relevant_content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::volunteer::VolunteerRepository;
    use crate::infrastructure::database::repositories::test_support::{
        day, insert_class, insert_notebook, new_volunteer, setup_db, setup_file_db,
    };
    use crate::infrastructure::database::repositories::volunteer_repository::SeaOrmVolunteerRepository;
    use crate::shared::FilterValue;

    async fn volunteer_id(db: &DatabaseConnection, email: &str) -> i32 {
        SeaOrmVolunteerRepository::new(db.clone())
            .create(new_volunteer(email, "Avaliador"))
            .await
            .unwrap()
            .id
    }

    fn evaluation(name: &str) -> NotebookEvaluation {
        NotebookEvaluation {
            evaluator_name: name.to_string(),
            evaluator_email: Some("eval@pep.org".into()),
            subjects: vec!["Sim".into(), "Não".into()],
            answers: vec!["Boa leitura".into()],
            relevant_content: Some("A leitura me libertou".into()),
            conclusion: "Aprovado".into(),
            archives_exclusion: true,
        }
    }

    #[tokio::test]
    async fn reserve_assigns_volunteer_once() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let class = insert_class(&db, "Unidade Norte").await;
        let id = insert_notebook(&db, Some(class), true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;
        let bia = volunteer_id(&db, "bia@pep.org").await;

        let reserved = repo.reserve(ana, id).await.unwrap().unwrap();
        assert!(reserved.is_reserved_by(ana));
        assert!(reserved.reserved_at.is_some());
        assert_eq!(
            reserved.notebook_directory.as_deref(),
            Some(format!("/notebooks/{}", 1).as_str())
        );

        let again = repo.reserve(bia, id).await.unwrap().unwrap();
        assert!(again.is_reserved_by(ana));
        assert_eq!(again.reserved_at, reserved.reserved_at);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reservations_have_one_winner() {
        let (db, path) = setup_file_db(4).await;
        let repo = Arc::new(SeaOrmNotebookRepository::new(db.clone()));
        let id = insert_notebook(&db, None, true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;
        let bia = volunteer_id(&db, "bia@pep.org").await;

        let contenders: Vec<i32> = [ana, bia].into_iter().cycle().take(8).collect();
        let tasks: Vec<_> = contenders
            .into_iter()
            .map(|volunteer| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.claim(volunteer, id).await.unwrap() })
            })
            .collect();

        let mut matched = Vec::new();
        for task in tasks {
            matched.push(task.await.unwrap());
        }
        assert_eq!(matched.iter().sum::<u64>(), 1, "{matched:?}");
        assert_eq!(matched.iter().filter(|rows| **rows == 0).count(), 7);

        let holder = repo.find_by_id(id).await.unwrap().unwrap().volunteer_id;
        assert!(holder == Some(ana) || holder == Some(bia));

        db.close().await.unwrap();
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unapproved_or_missing_notebook_is_not_reserved() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let id = insert_notebook(&db, None, false).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;

        let nb = repo.reserve(ana, id).await.unwrap().unwrap();
        assert_eq!(nb.volunteer_id, None);
        assert_eq!(nb.reserved_at, None);

        assert!(repo.reserve(ana, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revert_clears_reservation_and_is_noop_otherwise() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let id = insert_notebook(&db, None, true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;

        let untouched = repo.revert_reservation(id).await.unwrap().unwrap();
        assert_eq!(untouched, repo.find_by_id(id).await.unwrap().unwrap());
        assert!(untouched.is_reservable());

        repo.reserve(ana, id).await.unwrap();
        let reverted = repo.revert_reservation(id).await.unwrap().unwrap();
        assert_eq!(reverted.volunteer_id, None);
        assert_eq!(reverted.reserved_at, None);
        assert!(reverted.is_reservable());
    }

    #[tokio::test]
    async fn evaluation_is_saved_only_once() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let id = insert_notebook(&db, None, true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;
        repo.reserve(ana, id).await.unwrap();

        let evaluated = repo
            .save_evaluation(id, evaluation("Ana"))
            .await
            .unwrap()
            .unwrap();
        assert!(evaluated.evaluated_at.is_some());
        assert_eq!(evaluated.subjects, vec!["Sim".to_string(), "Não".to_string()]);
        assert_eq!(evaluated.conclusion.as_deref(), Some("Aprovado"));
        assert!(evaluated.archives_exclusion);

        let second = repo
            .save_evaluation(id, evaluation("Outra pessoa"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.evaluator_name.as_deref(), Some("Ana"));
        assert_eq!(second.evaluated_at, evaluated.evaluated_at);

        assert_eq!(repo.count_evaluated_by_volunteer(ana).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn available_and_reserved_listings() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let class = insert_class(&db, "Unidade Sul").await;
        let free = insert_notebook(&db, Some(class), true).await;
        let taken = insert_notebook(&db, Some(class), true).await;
        insert_notebook(&db, Some(class), false).await;
        insert_notebook(&db, None, true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;
        repo.reserve(ana, taken).await.unwrap();

        let available: Vec<i32> = repo
            .find_available()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(available, vec![free]);

        let reserved = repo.find_reserved_by_volunteer(ana).await.unwrap();
        assert_eq!(reserved.len(), 1);
        assert_eq!(reserved[0].id, taken);
    }

    #[tokio::test]
    async fn update_changes_administrative_fields() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let id = insert_notebook(&db, None, false).await;

        let changes = NotebookChanges {
            approved: Some(true),
            student_name: Some("Maria".into()),
            ..Default::default()
        };
        let nb = repo.update(id, changes).await.unwrap().unwrap();
        assert!(nb.approved);
        assert_eq!(nb.student_name, "Maria");
        assert!(repo.update(404, NotebookChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn evaluations_filtered_by_classes() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let five = insert_class(&db, "Unidade Cinco").await;
        let nine = insert_class(&db, "Unidade Nove").await;
        let other = insert_class(&db, "Unidade Outra").await;
        for i in 0..25 {
            insert_notebook(&db, Some(if i % 2 == 0 { five } else { nine }), true).await;
        }
        for _ in 0..4 {
            insert_notebook(&db, Some(other), true).await;
        }

        let params = PaginationParams::new(2, 10).with_filter(
            "classes",
            FilterValue::Many(vec![five.to_string(), nine.to_string()]),
        );
        let page = repo.fetch_evaluations(&params).await.unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page
            .data
            .iter()
            .all(|r| r.pep_id == Some(five) || r.pep_id == Some(nine)));
        assert!(page.data.windows(2).all(|w| w[0].id > w[1].id));

        let all = repo.find_evaluations(&params).await.unwrap();
        assert_eq!(all.len(), 25);
    }

    #[tokio::test]
    async fn evaluation_rows_carry_joined_names() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let class = insert_class(&db, "Penitenciária Central").await;
        let id = insert_notebook(&db, Some(class), true).await;
        insert_notebook(&db, None, true).await;
        let ana = volunteer_id(&db, "ana@pep.org").await;
        repo.reserve(ana, id).await.unwrap();

        let rows = repo
            .find_evaluations(&PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        let joined = rows.iter().find(|r| r.id == id).unwrap();
        assert_eq!(joined.place_name.as_deref(), Some("Penitenciária Central"));
        assert_eq!(joined.volunteer_name.as_deref(), Some("Avaliador"));
        let bare = rows.iter().find(|r| r.id != id).unwrap();
        assert_eq!(bare.place_name, None);
        assert_eq!(bare.volunteer_name, None);
    }

    #[tokio::test]
    async fn reflections_need_content_and_recent_evaluation() {
        let db = setup_db().await;
        let repo = SeaOrmNotebookRepository::new(db.clone());
        let with_content = insert_notebook(&db, None, true).await;
        let without_content = insert_notebook(&db, None, true).await;
        insert_notebook(&db, None, true).await;

        repo.save_evaluation(with_content, evaluation("Ana"))
            .await
            .unwrap();
        let mut silent = evaluation("Ana");
        silent.relevant_content = None;
        repo.save_evaluation(without_content, silent).await.unwrap();

        let reflections = repo.find_reflections(day(2020, 1, 1)).await.unwrap();
        assert_eq!(reflections.len(), 1);
        assert_eq!(reflections[0].relevant_content, "A leitura me libertou");

        let future = Utc::now() + chrono::Duration::days(1);
        assert!(repo.find_reflections(future).await.unwrap().is_empty());
    }
}
