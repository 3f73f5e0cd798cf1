use axum::{extract::{Path, State}, http::StatusCode, Json};
use uuid::Uuid;

use models::garage_service::NewService;
use service::db::services as store;
use service::garage::domain::{ServicePatch, ServiceRecord};

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(get, path = "/api/services", tag = "services", responses((status = 200, description = "Services", body = [crate::openapi::ServiceDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    Ok(Json(store::list_services(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/services/garage/{garage_id}", tag = "services",
    params(("garage_id" = Uuid, Path, description = "Garage id")),
    responses((status = 200, description = "Services of one garage", body = [crate::openapi::ServiceDoc]))
)]
pub async fn by_garage(State(state): State<ServerState>, Path(garage_id): Path<Uuid>) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    Ok(Json(state.garages.services_of(garage_id).await?))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error or unknown garage", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewService>) -> Result<(StatusCode, Json<ServiceRecord>), JsonApiError> {
    let created = store::create_service(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ServiceRecord>, JsonApiError> {
    store::get_service(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("Service with ID {} not found", id)))
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = crate::openapi::ServicePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(patch): Json<ServicePatch>) -> Result<Json<ServiceRecord>, JsonApiError> {
    Ok(Json(store::update_service(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match store::delete_service(&state.db, id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found(format!("Service with ID {} not found", id))),
    }
}
