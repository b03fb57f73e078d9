//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_authorizations;
mod m20240601_000002_create_places_and_classes;
mod m20240601_000003_create_volunteers;
mod m20240601_000004_create_notebooks;
mod m20240601_000005_create_attendances;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_authorizations::Migration),
            Box::new(m20240601_000002_create_places_and_classes::Migration),
            Box::new(m20240601_000003_create_volunteers::Migration),
            Box::new(m20240601_000004_create_notebooks::Migration),
            Box::new(m20240601_000005_create_attendances::Migration),
        ]
    }
}
