use axum::{extract::{Path, State}, http::StatusCode, Json};
use uuid::Uuid;

use models::auto_parts_shop::NewAutoPartsShop;
use service::db::auto_parts_shops::{self as store, AutoPartsShop, AutoPartsShopPatch};

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(get, path = "/api/auto-parts-shops", tag = "auto-parts-shops", responses((status = 200, description = "Shops", body = [crate::openapi::AutoPartsShopDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AutoPartsShop>>, JsonApiError> {
    Ok(Json(store::list_shops(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/auto-parts-shops", tag = "auto-parts-shops",
    request_body = crate::openapi::NewAutoPartsShopDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AutoPartsShopDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewAutoPartsShop>) -> Result<(StatusCode, Json<AutoPartsShop>), JsonApiError> {
    Ok((StatusCode::CREATED, Json(store::create_shop(&state.db, input).await?)))
}

#[utoipa::path(
    get, path = "/api/auto-parts-shops/{id}", tag = "auto-parts-shops",
    params(("id" = Uuid, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shop", body = crate::openapi::AutoPartsShopDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<AutoPartsShop>, JsonApiError> {
    store::get_shop(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("Auto parts shop with ID {} not found", id)))
}

#[utoipa::path(
    put, path = "/api/auto-parts-shops/{id}", tag = "auto-parts-shops",
    params(("id" = Uuid, Path, description = "Shop id")),
    request_body = crate::openapi::NewAutoPartsShopDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AutoPartsShopDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(patch): Json<AutoPartsShopPatch>) -> Result<Json<AutoPartsShop>, JsonApiError> {
    Ok(Json(store::update_shop(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/auto-parts-shops/{id}", tag = "auto-parts-shops",
    params(("id" = Uuid, Path, description = "Shop id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match store::delete_shop(&state.db, id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found(format!("Auto parts shop with ID {} not found", id))),
    }
}
