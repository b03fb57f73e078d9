//! Create authorizations table
//!
//! Named permission profiles assigned to volunteers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Authorizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Authorizations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Authorizations::ReadPermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Authorizations::AttendanceModulePermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Authorizations::ManageVolunteerModulePermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Authorizations::NotebookModulePermission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Authorizations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Authorizations {
    Table,
    Id,
    Name,
    ReadPermission,
    AttendanceModulePermission,
    ManageVolunteerModulePermission,
    NotebookModulePermission,
}
