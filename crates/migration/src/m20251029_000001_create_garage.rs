//! Create `garage` table.
//!
//! Rating is stored as NUMERIC(3,2); coordinates as double precision degrees.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Garage::Table)
                    .if_not_exists()
                    .col(uuid(Garage::Id).primary_key())
                    .col(string_len(Garage::Name, 200).not_null())
                    .col(string_len(Garage::Address, 500).not_null())
                    .col(double(Garage::Latitude).not_null())
                    .col(double(Garage::Longitude).not_null())
                    .col(decimal_len(Garage::Rating, 3, 2).not_null())
                    .col(timestamp_with_time_zone(Garage::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Garage::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Garage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Garage { Table, Id, Name, Address, Latitude, Longitude, Rating, CreatedAt, UpdatedAt }
