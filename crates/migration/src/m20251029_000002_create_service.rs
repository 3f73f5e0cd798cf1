//! Create `service` table.
//! Each row is an offering of exactly one garage; deleting the garage removes its services.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::GarageId).not_null())
                    .col(string_len(Service::Name, 200).not_null())
                    .col(string_len(Service::Description, 1000).not_null())
                    .col(decimal_len(Service::Price, 18, 2).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_garage")
                            .from(Service::Table, Service::GarageId)
                            .to(Garage::Table, Garage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    GarageId,
    Name,
    Description,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Garage { Table, Id }
