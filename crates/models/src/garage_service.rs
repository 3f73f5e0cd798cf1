//! A priced service offered by one garage (table `service`).
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, garage, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub garage_id: Uuid,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Garage }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Garage => Entity::belongs_to(garage::Entity)
                .from(Column::GarageId)
                .to(garage::Column::Id)
                .into(),
        }
    }
}

impl Related<garage::Entity> for Entity {
    fn to() -> RelationDef { Relation::Garage.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub garage_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
}

impl NewService {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validation::validate_required("name", &self.name, validation::NAME_MAX)?;
        validation::validate_len("description", &self.description, validation::DESCRIPTION_MAX)?;
        validation::validate_price(self.price)
    }
}

/// Insert a service. The caller is responsible for checking the garage exists;
/// the foreign key rejects orphans either way.
pub async fn create(db: &DatabaseConnection, input: NewService) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        garage_id: Set(input.garage_id),
        name: Set(input.name),
        description: Set(input.description),
        price: Set(input.price),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
