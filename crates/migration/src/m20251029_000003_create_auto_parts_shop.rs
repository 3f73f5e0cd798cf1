//! Create `auto_parts_shop` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AutoPartsShop::Table)
                    .if_not_exists()
                    .col(uuid(AutoPartsShop::Id).primary_key())
                    .col(string_len(AutoPartsShop::Name, 200).not_null())
                    .col(string_len(AutoPartsShop::Address, 500).not_null())
                    .col(double(AutoPartsShop::Latitude).not_null())
                    .col(double(AutoPartsShop::Longitude).not_null())
                    .col(decimal_len(AutoPartsShop::Rating, 3, 2).not_null())
                    .col(timestamp_with_time_zone(AutoPartsShop::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(AutoPartsShop::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AutoPartsShop::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AutoPartsShop { Table, Id, Name, Address, Latitude, Longitude, Rating, CreatedAt, UpdatedAt }
