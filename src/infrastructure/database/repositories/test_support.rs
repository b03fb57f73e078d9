//! In-memory SQLite fixtures for repository tests

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::domain::volunteer::NewVolunteer;
use crate::infrastructure::database::entities::{notebook, pep_class, place, workshop};
use crate::infrastructure::database::migrator::Migrator;

/// Fresh migrated database on a single pooled connection.
pub(crate) async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Migrated database in a temporary file, shared by `max_connections`
/// pooled connections so statements can really overlap.
pub(crate) async fn setup_file_db(max_connections: u32) -> (DatabaseConnection, PathBuf) {
    let path = std::env::temp_dir().join(format!("pep-admin-{}.db", uuid::Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options
        .max_connections(max_connections)
        .min_connections(max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    (db, path)
}

pub(crate) fn new_volunteer(email: &str, name: &str) -> NewVolunteer {
    NewVolunteer {
        email: email.to_string(),
        name: name.to_string(),
        pep_id: None,
        birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        phone_number: "81999990000".into(),
        country: "Brasil".into(),
        state: "PE".into(),
        city: "Recife".into(),
        disability: None,
        how_found_pep: "Instagram".into(),
        knowledge_pep: "Pouco".into(),
        workshops: vec!["Leitura".into()],
        schooling: "Superior completo".into(),
        bachelor: Some("Letras".into()),
        studies_knowledge: "Literatura".into(),
        life_experience: "Professora".into(),
        desires: "Ajudar".into(),
        roles_pep: vec!["Avaliador".into()],
        interest_future_roles: vec!["Coordenação".into()],
        need_declaration: false,
    }
}

pub(crate) async fn insert_class(db: &DatabaseConnection, place_name: &str) -> i32 {
    let place = place::ActiveModel {
        full_name: Set(place_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    pep_class::ActiveModel {
        place_id: Set(place.id),
        notebook_directory: Set(Some(format!("/notebooks/{}", place.id))),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn insert_workshop(db: &DatabaseConnection, name: &str) -> i32 {
    workshop::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) async fn insert_notebook(
    db: &DatabaseConnection,
    pep_id: Option<i32>,
    approved: bool,
) -> i32 {
    notebook::ActiveModel {
        volunteer_id: Set(None),
        pep_id: Set(pep_id),
        student_name: Set("Aluno".to_string()),
        student_registration: Set(Some("123".to_string())),
        student_prison_unit: Set(Some("Unidade".to_string())),
        evaluator_name: Set(None),
        evaluator_email: Set(None),
        subjects: Set("[]".to_string()),
        answers: Set("[]".to_string()),
        relevant_content: Set(None),
        conclusion: Set(None),
        approved: Set(approved),
        archives_exclusion: Set(false),
        reserved_at: Set(None),
        evaluated_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub(crate) fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}
