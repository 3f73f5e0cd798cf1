use uuid::Uuid;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait, QueryOrder, Set};
use tracing::info;
use models::{garage, garage_service, validation};
use crate::errors::ServiceError;
use crate::garage::domain::{ServicePatch, ServiceRecord};

/// Create a service for an existing garage.
pub async fn create_service(db: &DatabaseConnection, input: garage_service::NewService) -> Result<ServiceRecord, ServiceError> {
    let garage_exists = garage::Entity::find_by_id(input.garage_id).one(db).await?.is_some();
    if !garage_exists {
        return Err(ServiceError::Validation(format!("Garage with ID {} not found", input.garage_id)));
    }
    let created = garage_service::create(db, input).await?;
    info!(service_id = %created.id, garage_id = %created.garage_id, "service_created");
    Ok(created.into())
}

pub async fn get_service(db: &DatabaseConnection, id: Uuid) -> Result<Option<ServiceRecord>, ServiceError> {
    Ok(garage_service::Entity::find_by_id(id).one(db).await?.map(ServiceRecord::from))
}

/// List all services, oldest first.
pub async fn list_services(db: &DatabaseConnection) -> Result<Vec<ServiceRecord>, ServiceError> {
    let rows = garage_service::Entity::find()
        .order_by_asc(garage_service::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(ServiceRecord::from).collect())
}

pub async fn update_service(db: &DatabaseConnection, id: Uuid, patch: ServicePatch) -> Result<ServiceRecord, ServiceError> {
    let mut am: garage_service::ActiveModel = garage_service::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("Service", id))?
        .into();
    if let Some(n) = patch.name {
        validation::validate_required("name", &n, validation::NAME_MAX)?;
        am.name = Set(n);
    }
    if let Some(d) = patch.description {
        validation::validate_len("description", &d, validation::DESCRIPTION_MAX)?;
        am.description = Set(d);
    }
    if let Some(p) = patch.price { validation::validate_price(p)?; am.price = Set(p); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    Ok(updated.into())
}

pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = garage_service::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
