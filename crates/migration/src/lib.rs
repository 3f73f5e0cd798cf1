//! Migrator registering entity-specific migrations in dependency order.
//! Indexes follow the table creations; later column changes come after them.
pub use sea_orm_migration::prelude::*;

mod m20251029_000001_create_garage;
mod m20251029_000002_create_service;
mod m20251029_000003_create_auto_parts_shop;
mod m20251029_000010_add_indexes;
mod m20251030_000001_add_service_updated_at;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251029_000001_create_garage::Migration),
            Box::new(m20251029_000002_create_service::Migration),
            Box::new(m20251029_000003_create_auto_parts_shop::Migration),
            // indexes once all tables exist
            Box::new(m20251029_000010_add_indexes::Migration),
            Box::new(m20251030_000001_add_service_updated_at::Migration),
        ]
    }
}
