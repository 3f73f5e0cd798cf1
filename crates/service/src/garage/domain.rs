use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
/// Reported when a garage has no services.
pub const NO_SERVICE: &str = "N/A";

/// Garage as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::garage::Model> for Garage {
    fn from(m: models::garage::Model) -> Self {
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

/// Partial garage update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaragePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<Decimal>,
}

/// A garage's service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: Uuid,
    pub garage_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::garage_service::Model> for ServiceRecord {
    fn from(m: models::garage_service::Model) -> Self {
        Self {
            id: m.id,
            garage_id: m.garage_id,
            name: m.name,
            description: m.description,
            price: m.price,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Caller position and search radius for a nearby search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default)]
    pub min_rating: Option<Decimal>,
}

fn default_radius_km() -> f64 { DEFAULT_RADIUS_KM }

impl SearchQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, radius_km: DEFAULT_RADIUS_KM, min_rating: None }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_min_rating(mut self, min_rating: Decimal) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Reject out-of-range coordinates, a non-positive radius or a rating
    /// threshold outside 0..=5.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ServiceError::validation("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ServiceError::validation("longitude must be within [-180, 180]"));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(ServiceError::validation("radiusKm must be greater than 0"));
        }
        if let Some(min) = self.min_rating {
            if min < Decimal::ZERO || min > Decimal::from(5) {
                return Err(ServiceError::validation("minRating must be within [0, 5]"));
            }
        }
        Ok(())
    }
}

/// Search hit: the garage plus per-request derived fields. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageWithDistance {
    #[serde(flatten)]
    pub garage: Garage,
    /// Kilometres from the caller, rounded to two decimals.
    pub distance_km: f64,
    pub service_count: u64,
}

/// Store-side aggregate over one garage's service prices. Price fields are
/// `None` when the garage has no services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceAggregate {
    pub count: u64,
    pub average: Option<Decimal>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Descriptive statistics over a garage's services, computed per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsReport {
    pub garage_id: Uuid,
    pub garage_name: String,
    pub rating: Decimal,
    pub total_services: u64,
    pub average_service_price: Decimal,
    pub min_service_price: Decimal,
    pub max_service_price: Decimal,
    pub total_revenue_potential: Decimal,
    pub most_expensive_service: String,
    pub service_categories: Vec<CategoryCount>,
    pub created_at: DateTime<Utc>,
    pub days_since_creation: i64,
}
