//! Create the pending upload and pending delete tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingUpload::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingUpload::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PendingUpload::RemotePath)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PendingUpload::LocalUri).text().not_null())
                    .col(ColumnDef::new(PendingUpload::SessionUri).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PendingDelete::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingDelete::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PendingDelete::RemotePath)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PendingUpload::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PendingDelete::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PendingUpload {
    Table,
    Id,
    RemotePath,
    LocalUri,
    SessionUri,
}

#[derive(DeriveIden)]
enum PendingDelete {
    Table,
    Id,
    RemotePath,
}
