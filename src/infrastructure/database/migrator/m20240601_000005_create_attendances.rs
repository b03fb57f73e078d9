//! Create workshops and attendances tables
//!
//! A volunteer can attend a given workshop only once.

use sea_orm_migration::prelude::*;

use super::m20240601_000003_create_volunteers::Volunteers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workshops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Workshops::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Workshops::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendances::VolunteerId).integer().not_null())
                    .col(ColumnDef::new(Attendances::WorkshopId).integer().not_null())
                    .col(
                        ColumnDef::new(Attendances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendances_volunteer")
                            .from(Attendances::Table, Attendances::VolunteerId)
                            .to(Volunteers::Table, Volunteers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendances_workshop")
                            .from(Attendances::Table, Attendances::WorkshopId)
                            .to(Workshops::Table, Workshops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_volunteer_workshop")
                    .table(Attendances::Table)
                    .col(Attendances::VolunteerId)
                    .col(Attendances::WorkshopId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_created_at")
                    .table(Attendances::Table)
                    .col(Attendances::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workshops::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Workshops {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Attendances {
    Table,
    Id,
    VolunteerId,
    WorkshopId,
    CreatedAt,
}
