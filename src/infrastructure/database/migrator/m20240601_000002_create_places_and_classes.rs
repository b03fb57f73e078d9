//! Create places and pep_classes tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::FullName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PepClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PepClasses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PepClasses::PlaceId).integer().not_null())
                    .col(ColumnDef::new(PepClasses::NotebookDirectory).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pep_classes_place")
                            .from(PepClasses::Table, PepClasses::PlaceId)
                            .to(Places::Table, Places::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PepClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Places {
    Table,
    Id,
    FullName,
}

#[derive(Iden)]
pub enum PepClasses {
    Table,
    Id,
    PlaceId,
    NotebookDirectory,
}
