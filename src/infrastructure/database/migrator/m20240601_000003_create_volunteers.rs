//! Create volunteers and volunteer_hours tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Volunteers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Volunteers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Volunteers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Volunteers::Name).string().not_null())
                    .col(ColumnDef::new(Volunteers::PepId).integer())
                    .col(ColumnDef::new(Volunteers::PasswordHash).string())
                    .col(ColumnDef::new(Volunteers::Authorization).string())
                    .col(ColumnDef::new(Volunteers::BirthDate).date().not_null())
                    .col(ColumnDef::new(Volunteers::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Volunteers::Country).string().not_null())
                    .col(ColumnDef::new(Volunteers::State).string().not_null())
                    .col(ColumnDef::new(Volunteers::City).string().not_null())
                    .col(ColumnDef::new(Volunteers::Disability).string())
                    .col(ColumnDef::new(Volunteers::HowFoundPep).string().not_null())
                    .col(ColumnDef::new(Volunteers::KnowledgePep).string().not_null())
                    .col(
                        ColumnDef::new(Volunteers::Workshops)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Volunteers::Schooling).string().not_null())
                    .col(ColumnDef::new(Volunteers::Bachelor).string())
                    .col(
                        ColumnDef::new(Volunteers::StudiesKnowledge)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Volunteers::LifeExperience).string().not_null())
                    .col(ColumnDef::new(Volunteers::Desires).string().not_null())
                    .col(
                        ColumnDef::new(Volunteers::RolesPep)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Volunteers::InterestFutureRoles)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Volunteers::NeedDeclaration)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Volunteers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_volunteers_created_at")
                    .table(Volunteers::Table)
                    .col(Volunteers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VolunteerHours::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VolunteerHours::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VolunteerHours::VolunteerId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VolunteerHours::Hours).double().not_null())
                    .col(ColumnDef::new(VolunteerHours::Description).string())
                    .col(
                        ColumnDef::new(VolunteerHours::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_volunteer_hours_volunteer")
                            .from(VolunteerHours::Table, VolunteerHours::VolunteerId)
                            .to(Volunteers::Table, Volunteers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VolunteerHours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Volunteers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Volunteers {
    Table,
    Id,
    Email,
    Name,
    PepId,
    PasswordHash,
    Authorization,
    BirthDate,
    PhoneNumber,
    Country,
    State,
    City,
    Disability,
    HowFoundPep,
    KnowledgePep,
    Workshops,
    Schooling,
    Bachelor,
    StudiesKnowledge,
    LifeExperience,
    Desires,
    RolesPep,
    InterestFutureRoles,
    NeedDeclaration,
    CreatedAt,
}

#[derive(Iden)]
pub enum VolunteerHours {
    Table,
    Id,
    VolunteerId,
    Hours,
    Description,
    CreatedAt,
}
