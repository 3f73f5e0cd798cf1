use uuid::Uuid;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use models::{auto_parts_shop, validation};
use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPartsShop {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<auto_parts_shop::Model> for AutoPartsShop {
    fn from(m: auto_parts_shop::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            latitude: m.latitude,
            longitude: m.longitude,
            rating: m.rating,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPartsShopPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<Decimal>,
}

pub async fn create_shop(db: &DatabaseConnection, input: auto_parts_shop::NewAutoPartsShop) -> Result<AutoPartsShop, ServiceError> {
    Ok(auto_parts_shop::create(db, input).await?.into())
}

pub async fn get_shop(db: &DatabaseConnection, id: Uuid) -> Result<Option<AutoPartsShop>, ServiceError> {
    Ok(auto_parts_shop::Entity::find_by_id(id).one(db).await?.map(AutoPartsShop::from))
}

pub async fn list_shops(db: &DatabaseConnection) -> Result<Vec<AutoPartsShop>, ServiceError> {
    let rows = auto_parts_shop::Entity::find()
        .order_by_asc(auto_parts_shop::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(AutoPartsShop::from).collect())
}

pub async fn update_shop(db: &DatabaseConnection, id: Uuid, patch: AutoPartsShopPatch) -> Result<AutoPartsShop, ServiceError> {
    let mut am: auto_parts_shop::ActiveModel = auto_parts_shop::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("Auto parts shop", id))?
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
    Ok(am.update(db).await?.into())
}

pub async fn delete_shop(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = auto_parts_shop::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn shop_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let shop = create_shop(&db, auto_parts_shop::NewAutoPartsShop {
            name: format!("svc_shop_{}", Uuid::new_v4()),
            address: "5 Parts Lane".into(),
            latitude: 40.7128,
            longitude: -74.006,
            rating: Decimal::new(350, 2),
        }).await?;

        let patched = update_shop(&db, shop.id, AutoPartsShopPatch { address: Some("6 Parts Lane".into()), ..Default::default() }).await?;
        assert_eq!(patched.address, "6 Parts Lane");
        assert_eq!(patched.name, shop.name);

        assert!(list_shops(&db).await?.iter().any(|s| s.id == shop.id));
        assert!(delete_shop(&db, shop.id).await?);
        assert!(get_shop(&db, shop.id).await?.is_none());
        Ok(())
    }
}
