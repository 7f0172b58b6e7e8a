use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_beneficiaries::Beneficiaries;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // status and priority hold the Spanish enum values
        // ("Pendiente", "Aprobada", ... / "Baja", "Media", ...)
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Requests::BeneficiaryId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requests::Description).text().not_null())
                    .col(
                        ColumnDef::new(Requests::Status)
                            .string()
                            .not_null()
                            .default("Pendiente"),
                    )
                    .col(
                        ColumnDef::new(Requests::Priority)
                            .string()
                            .not_null()
                            .default("Media"),
                    )
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requests::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_beneficiary_id")
                            .from(Requests::Table, Requests::BeneficiaryId)
                            .to(Beneficiaries::Table, Beneficiaries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_beneficiary_id")
                    .table(Requests::Table)
                    .col(Requests::BeneficiaryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_status_priority")
                    .table(Requests::Table)
                    .col(Requests::Status)
                    .col(Requests::Priority)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_requests_created_at")
                    .table(Requests::Table)
                    .col(Requests::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    BeneficiaryId,
    Description,
    Status,
    Priority,
    CreatedAt,
    UpdatedAt,
}
