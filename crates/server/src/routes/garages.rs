use axum::{extract::{rejection::QueryRejection, Path, Query, State}, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::pagination::Pagination;
use models::garage::NewGarage;
use service::db::garages as store;
use service::garage::domain::{Garage, GaragePatch, GarageWithDistance, SearchQuery, StatisticsReport};

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to the configured radius (10 km)
    pub radius_km: Option<f64>,
    pub min_rating: Option<f64>,
}

impl SearchParams {
    fn into_query(self, default_radius_km: f64) -> Result<SearchQuery, JsonApiError> {
        let mut query = SearchQuery::new(self.latitude, self.longitude)
            .with_radius(self.radius_km.unwrap_or(default_radius_km));
        if let Some(min) = self.min_rating {
            let min = Decimal::try_from(min)
                .map_err(|_| JsonApiError::bad_request("minRating must be a number"))?;
            query = query.with_min_rating(min);
        }
        Ok(query)
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopRatedParams {
    pub count: Option<u64>,
}

#[utoipa::path(
    get, path = "/api/garages", tag = "garages",
    params(
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("perPage" = Option<u32>, Query, description = "Page size, at most 100")
    ),
    responses((status = 200, description = "Garages", body = [crate::openapi::GarageDoc]))
)]
pub async fn list(State(state): State<ServerState>, page: Result<Query<Pagination>, QueryRejection>) -> Result<Json<Vec<Garage>>, JsonApiError> {
    let Query(page) = page?;
    let list = store::list_garages_paginated(&state.db, page).await?;
    info!(count = list.len(), page = page.page, "list garages");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/garages", tag = "garages",
    request_body = crate::openapi::NewGarageDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::GarageDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewGarage>) -> Result<(StatusCode, Json<Garage>), JsonApiError> {
    let garage = store::create_garage(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(garage)))
}

#[utoipa::path(
    get, path = "/api/garages/{id}", tag = "garages",
    params(("id" = Uuid, Path, description = "Garage id")),
    responses(
        (status = 200, description = "Garage", body = crate::openapi::GarageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Garage>, JsonApiError> {
    store::get_garage(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("Garage with ID {} not found", id)))
}

#[utoipa::path(
    put, path = "/api/garages/{id}", tag = "garages",
    params(("id" = Uuid, Path, description = "Garage id")),
    request_body = crate::openapi::GaragePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::GarageDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(patch): Json<GaragePatch>) -> Result<Json<Garage>, JsonApiError> {
    let garage = store::update_garage(&state.db, id, patch).await?;
    info!(garage_id = %id, "garage_updated");
    Ok(Json(garage))
}

#[utoipa::path(
    delete, path = "/api/garages/{id}", tag = "garages",
    params(("id" = Uuid, Path, description = "Garage id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match store::delete_garage(&state.db, id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found(format!("Garage with ID {} not found", id))),
    }
}

#[utoipa::path(
    get, path = "/api/garages/search", tag = "garages",
    params(SearchParams),
    responses(
        (status = 200, description = "Garages within the radius, nearest first", body = [crate::openapi::GarageWithDistanceDoc]),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn search(State(state): State<ServerState>, params: Result<Query<SearchParams>, QueryRejection>) -> Result<Json<Vec<GarageWithDistance>>, JsonApiError> {
    let Query(params) = params?;
    let query = params.into_query(state.search.default_radius_km)?;
    Ok(Json(state.garages.search_nearby(query).await?))
}

#[utoipa::path(
    get, path = "/api/garages/top-rated", tag = "garages",
    params(TopRatedParams),
    responses(
        (status = 200, description = "Best rated garages, newest first on equal rating", body = [crate::openapi::GarageDoc]),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn top_rated(State(state): State<ServerState>, params: Result<Query<TopRatedParams>, QueryRejection>) -> Result<Json<Vec<Garage>>, JsonApiError> {
    let Query(params) = params?;
    let count = params
        .count
        .unwrap_or(state.search.default_top_rated)
        .min(state.search.max_top_rated);
    Ok(Json(state.garages.top_rated(count).await?))
}

#[utoipa::path(
    get, path = "/api/garages/{id}/statistics", tag = "garages",
    params(("id" = Uuid, Path, description = "Garage id")),
    responses(
        (status = 200, description = "Statistics report", body = crate::openapi::StatisticsReportDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn statistics(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<StatisticsReport>, JsonApiError> {
    Ok(Json(state.garages.statistics(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_fall_back_to_configured_radius() {
        let params = SearchParams { latitude: 1.0, longitude: 2.0, radius_km: None, min_rating: None };
        let q = params.into_query(25.0).unwrap();
        assert_eq!(q.radius_km, 25.0);
        assert!(q.min_rating.is_none());
    }

    #[test]
    fn search_params_convert_min_rating() {
        let params = SearchParams { latitude: 1.0, longitude: 2.0, radius_km: Some(3.0), min_rating: Some(4.5) };
        let q = params.into_query(10.0).unwrap();
        assert_eq!(q.radius_km, 3.0);
        assert_eq!(q.min_rating, Some(Decimal::new(45, 1)));
    }

    #[test]
    fn search_params_reject_non_finite_rating() {
        let params = SearchParams { latitude: 1.0, longitude: 2.0, radius_km: None, min_rating: Some(f64::NAN) };
        assert!(params.into_query(10.0).is_err());
    }
}
