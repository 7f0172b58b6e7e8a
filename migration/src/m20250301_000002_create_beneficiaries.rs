use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beneficiaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Beneficiaries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::FullName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Beneficiaries::BirthDate).date().null())
                    .col(ColumnDef::new(Beneficiaries::DisabilityType).string().null())
                    .col(ColumnDef::new(Beneficiaries::Notes).text().null())
                    .col(
                        ColumnDef::new(Beneficiaries::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Beneficiaries::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_beneficiaries_created_at")
                    .table(Beneficiaries::Table)
                    .col(Beneficiaries::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Beneficiaries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Beneficiaries {
    Table,
    Id,
    FullName,
    BirthDate,
    DisabilityType,
    Notes,
    CreatedAt,
    UpdatedAt,
}
