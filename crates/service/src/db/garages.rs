use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait, QueryOrder, Set};
use tracing::info;
use models::{garage, validation};
use common::pagination::Pagination;
use crate::errors::ServiceError;
use crate::garage::domain::{Garage, GaragePatch};

/// Create a garage.
pub async fn create_garage(db: &DatabaseConnection, input: garage::NewGarage) -> Result<Garage, ServiceError> {
    let created = garage::create(db, input).await?;
    info!(garage_id = %created.id, name = %created.name, "garage_created");
    Ok(created.into())
}

/// Get garage by id.
pub async fn get_garage(db: &DatabaseConnection, id: Uuid) -> Result<Option<Garage>, ServiceError> {
    Ok(garage::Entity::find_by_id(id).one(db).await?.map(Garage::from))
}

/// List garages, oldest first, one page at a time.
pub async fn list_garages_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<Garage>, ServiceError> {
    use sea_orm::PaginatorTrait;
    let (page_idx, per_page) = opts.normalize();
    let rows = garage::Entity::find()
        .order_by_asc(garage::Column::CreatedAt)
        .order_by_asc(garage::Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await?;
    Ok(rows.into_iter().map(Garage::from).collect())
}

/// Apply the present fields of `patch` and bump `updated_at`.
pub async fn update_garage(db: &DatabaseConnection, id: Uuid, patch: GaragePatch) -> Result<Garage, ServiceError> {
    let mut am: garage::ActiveModel = garage::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("Garage", id))?
        .into();
    if let Some(n) = patch.name {
        validation::validate_required("name", &n, validation::NAME_MAX)?;
        am.name = Set(n);
    }
    if let Some(a) = patch.address {
        validation::validate_required("address", &a, validation::ADDRESS_MAX)?;
        am.address = Set(a);
    }
    if let Some(lat) = patch.latitude { validation::validate_latitude(lat)?; am.latitude = Set(lat); }
    if let Some(lon) = patch.longitude { validation::validate_longitude(lon)?; am.longitude = Set(lon); }
    if let Some(r) = patch.rating { validation::validate_rating(r)?; am.rating = Set(r); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    Ok(updated.into())
}

/// Delete garage (its services cascade). Returns false when it did not exist.
pub async fn delete_garage(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = garage::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 { info!(garage_id = %id, "garage_deleted"); }
    Ok(res.rows_affected > 0)
}
