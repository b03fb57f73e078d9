//! Create notebooks table
//!
//! Student notebooks and their evaluation lifecycle columns
//! (`volunteer_id`, `reserved_at`, `evaluated_at`).

use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_places_and_classes::PepClasses;
use super::m20240601_000003_create_volunteers::Volunteers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notebooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notebooks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notebooks::VolunteerId).integer())
                    .col(ColumnDef::new(Notebooks::PepId).integer())
                    .col(ColumnDef::new(Notebooks::StudentName).string().not_null())
                    .col(ColumnDef::new(Notebooks::StudentRegistration).string())
                    .col(ColumnDef::new(Notebooks::StudentPrisonUnit).string())
                    .col(ColumnDef::new(Notebooks::EvaluatorName).string())
                    .col(ColumnDef::new(Notebooks::EvaluatorEmail).string())
                    .col(
                        ColumnDef::new(Notebooks::Subjects)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Notebooks::Answers)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Notebooks::RelevantContent).text())
                    .col(ColumnDef::new(Notebooks::Conclusion).text())
                    .col(
                        ColumnDef::new(Notebooks::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notebooks::ArchivesExclusion)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notebooks::ReservedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Notebooks::EvaluatedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Notebooks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notebooks_volunteer")
                            .from(Notebooks::Table, Notebooks::VolunteerId)
                            .to(Volunteers::Table, Volunteers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notebooks_pep_class")
                            .from(Notebooks::Table, Notebooks::PepId)
                            .to(PepClasses::Table, PepClasses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notebooks_volunteer")
                    .table(Notebooks::Table)
                    .col(Notebooks::VolunteerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notebooks_pep")
                    .table(Notebooks::Table)
                    .col(Notebooks::PepId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notebooks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Notebooks {
    Table,
    Id,
    VolunteerId,
    PepId,
    StudentName,
    StudentRegistration,
    StudentPrisonUnit,
    EvaluatorName,
    EvaluatorEmail,
    Subjects,
    Answers,
    RelevantContent,
    Conclusion,
    Approved,
    ArchivesExclusion,
    ReservedAt,
    EvaluatedAt,
    CreatedAt,
}
