use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: group-by-count and per-garage aggregates filter on garage_id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_garage")
                    .table(Service::Table)
                    .col(Service::GarageId)
                    .to_owned(),
            )
            .await?;

        // Garage: min-rating filter and top-rated ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_garage_rating_created")
                    .table(Garage::Table)
                    .col(Garage::Rating)
                    .col(Garage::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_garage").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_garage_rating_created").table(Garage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, GarageId }

#[derive(DeriveIden)]
enum Garage { Table, Rating, CreatedAt }
