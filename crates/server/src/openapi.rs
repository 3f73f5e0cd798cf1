//! Documentation-only schemas. Money and ratings are JSON numbers with two
//! decimals; timestamps are RFC 3339 strings.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody { pub error: String, pub message: Option<String>, pub status_code: u16 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarageDoc {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewGarageDoc { pub name: String, pub address: String, pub latitude: f64, pub longitude: f64, pub rating: Option<f64> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GaragePatchDoc {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
}

/// Garage fields plus the per-request distance and service count.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GarageWithDistanceDoc {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
    pub distance_km: f64,
    pub service_count: u64,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryCountDoc { pub category: String, pub count: u64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticsReportDoc {
    pub garage_id: Uuid,
    pub garage_name: String,
    pub rating: f64,
    pub total_services: u64,
    pub average_service_price: f64,
    pub min_service_price: f64,
    pub max_service_price: f64,
    pub total_revenue_potential: f64,
    /// "N/A" when the garage has no services
    pub most_expensive_service: String,
    pub service_categories: Vec<CategoryCountDoc>,
    pub created_at: String,
    pub days_since_creation: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: Uuid,
    pub garage_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceDoc { pub garage_id: Uuid, pub name: String, pub description: Option<String>, pub price: f64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatchDoc { pub name: Option<String>, pub description: Option<String>, pub price: Option<f64> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoPartsShopDoc {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAutoPartsShopDoc { pub name: String, pub address: String, pub latitude: f64, pub longitude: f64, pub rating: Option<f64> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::garages::list,
        crate::routes::garages::create,
        crate::routes::garages::get,
        crate::routes::garages::update,
        crate::routes::garages::delete,
        crate::routes::garages::search,
        crate::routes::garages::top_rated,
        crate::routes::garages::statistics,
        crate::routes::services::list,
        crate::routes::services::by_garage,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::auto_parts_shops::list,
        crate::routes::auto_parts_shops::create,
        crate::routes::auto_parts_shops::get,
        crate::routes::auto_parts_shops::update,
        crate::routes::auto_parts_shops::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            GarageDoc,
            NewGarageDoc,
            GaragePatchDoc,
            GarageWithDistanceDoc,
            CategoryCountDoc,
            StatisticsReportDoc,
            ServiceDoc,
            NewServiceDoc,
            ServicePatchDoc,
            AutoPartsShopDoc,
            NewAutoPartsShopDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "garages"),
        (name = "services"),
        (name = "auto-parts-shops")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_search_and_statistics() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/garages/search"));
        assert!(doc.paths.paths.contains_key("/api/garages/{id}/statistics"));
        assert!(doc.paths.paths.contains_key("/api/auto-parts-shops/{id}"));
    }
}
