use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use models::{garage, garage_service};

use crate::errors::ServiceError;
use crate::garage::domain::{Garage, PriceAggregate, ServiceRecord};
use crate::garage::repository::GarageRepository;

/// Postgres-backed repository; every method is a single SQL statement.
#[derive(Clone)]
pub struct SeaOrmGarageRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmGarageRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[derive(Debug, FromQueryResult)]
struct PriceAggregateRow {
    service_count: i64,
    avg_price: Option<Decimal>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    total_price: Option<Decimal>,
}

fn non_negative(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

#[async_trait::async_trait]
impl GarageRepository for SeaOrmGarageRepository {
    async fn fetch_garages(&self, min_rating: Option<Decimal>) -> Result<Vec<Garage>, ServiceError> {
        let mut select = garage::Entity::find();
        if let Some(min) = min_rating {
            select = select.filter(garage::Column::Rating.gte(min));
        }
        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(Garage::from).collect())
    }

    async fn count_services_by_garage(&self) -> Result<HashMap<Uuid, u64>, ServiceError> {
        let rows: Vec<(Uuid, i64)> = garage_service::Entity::find()
            .select_only()
            .column(garage_service::Column::GarageId)
            .column_as(Expr::col(garage_service::Column::Id).count(), "service_count")
            .group_by(garage_service::Column::GarageId)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(id, n)| (id, non_negative(n))).collect())
    }

    async fn fetch_services(&self, garage_id: Uuid) -> Result<Vec<ServiceRecord>, ServiceError> {
        let rows = garage_service::Entity::find()
            .filter(garage_service::Column::GarageId.eq(garage_id))
            .order_by_asc(garage_service::Column::CreatedAt)
            .order_by_asc(garage_service::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(ServiceRecord::from).collect())
    }

    async fn find_garage(&self, id: Uuid) -> Result<Option<Garage>, ServiceError> {
        Ok(garage::Entity::find_by_id(id).one(&self.db).await?.map(Garage::from))
    }

    async fn top_rated(&self, limit: u64) -> Result<Vec<Garage>, ServiceError> {
        let rows = garage::Entity::find()
            .order_by_desc(garage::Column::Rating)
            .order_by_desc(garage::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Garage::from).collect())
    }

    async fn price_aggregate(&self, garage_id: Uuid) -> Result<PriceAggregate, ServiceError> {
        let price = || Expr::col(garage_service::Column::Price);
        let row = garage_service::Entity::find()
            .filter(garage_service::Column::GarageId.eq(garage_id))
            .select_only()
            .column_as(Expr::col(garage_service::Column::Id).count(), "service_count")
            .column_as(SimpleExpr::from(Func::avg(price())), "avg_price")
            .column_as(price().min(), "min_price")
            .column_as(price().max(), "max_price")
            .column_as(price().sum(), "total_price")
            .into_model::<PriceAggregateRow>()
            .one(&self.db)
            .await?;
        Ok(row
            .map(|r| PriceAggregate {
                count: non_negative(r.service_count),
                average: r.avg_price,
                min: r.min_price,
                max: r.max_price,
                total: r.total_price,
            })
            .unwrap_or_default())
    }

    async fn most_expensive_service(&self, garage_id: Uuid) -> Result<Option<String>, ServiceError> {
        let name = garage_service::Entity::find()
            .filter(garage_service::Column::GarageId.eq(garage_id))
            .order_by_desc(garage_service::Column::Price)
            .order_by_asc(garage_service::Column::Name)
            .select_only()
            .column(garage_service::Column::Name)
            .into_tuple::<String>()
            .one(&self.db)
            .await?;
        Ok(name)
    }

    async fn service_names(&self, garage_id: Uuid) -> Result<Vec<String>, ServiceError> {
        let names = garage_service::Entity::find()
            .filter(garage_service::Column::GarageId.eq(garage_id))
            .order_by_asc(garage_service::Column::CreatedAt)
            .order_by_asc(garage_service::Column::Id)
            .select_only()
            .column(garage_service::Column::Name)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(names)
    }
}
