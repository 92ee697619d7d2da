use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use models::bank;
use serde::Deserialize;
use service::domain::BankInput;
use service::query::BankCriteria;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BankListQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Substring of the BIK
    pub bik: Option<String>,
    /// `id`, `name` or `bik`
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
}

#[utoipa::path(
    get, path = "/api/banks", tag = "banks",
    params(BankListQuery),
    responses(
        (status = 200, description = "Matching banks", body = [crate::openapi::BankDoc]),
        (status = 400, description = "Unknown sort field", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "No banks match", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<BankListQuery>,
) -> Result<Json<Vec<bank::Model>>, JsonApiError> {
    let criteria = BankCriteria { name: q.name, bik: q.bik };
    state
        .services
        .banks
        .list(criteria, q.sort_by.as_deref(), q.direction.as_deref())
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    get, path = "/api/banks/{id}", tag = "banks",
    params(("id" = i32, Path, description = "Bank id")),
    responses(
        (status = 200, description = "Bank", body = crate::openapi::BankDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<bank::Model>, JsonApiError> {
    state.services.banks.get(id).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    post, path = "/api/banks", tag = "banks",
    request_body = crate::openapi::BankRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::BankDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Name or BIK already taken", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(input): ApiJson<BankInput>,
) -> Result<Json<bank::Model>, JsonApiError> {
    let draft = input.validate().map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    state.services.banks.create(draft).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    put, path = "/api/banks/{id}", tag = "banks",
    params(("id" = i32, Path, description = "Bank id")),
    request_body = crate::openapi::BankRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BankDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<BankInput>,
) -> Result<Json<bank::Model>, JsonApiError> {
    let draft = input.validate().map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    state.services.banks.update(id, draft).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    delete, path = "/api/banks/{id}", tag = "banks",
    params(("id" = i32, Path, description = "Bank id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Bank still has deposits", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.services.banks.delete(id).await.map_err(|e| JsonApiError::from_service(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
