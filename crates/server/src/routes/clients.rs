use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use models::{client, LegalForm};
use serde::Deserialize;
use service::domain::ClientInput;
use service::query::ClientCriteria;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClientListQuery {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub address: Option<String>,
    /// Code (`OOO`, `IP`, ...) or label (`ООО`, `ИП`, ...)
    pub legal_form: Option<String>,
    /// `id`, `name`, `shortName`, `address` or `legalForm`
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[utoipa::path(
    get, path = "/api/clients", tag = "clients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "Matching clients", body = [crate::openapi::ClientDoc]),
        (status = 400, description = "Unknown sort field or legal form", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "No clients match", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<ClientListQuery>,
) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    let legal_form = q
        .legal_form
        .as_deref()
        .map(LegalForm::parse)
        .transpose()
        .map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    let criteria = ClientCriteria { name: q.name, short_name: q.short_name, address: q.address, legal_form };
    state
        .services
        .clients
        .list(criteria, q.sort_by.as_deref(), q.direction.as_deref())
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    get, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client", body = crate::openapi::ClientDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<client::Model>, JsonApiError> {
    state.services.clients.get(id).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    post, path = "/api/clients", tag = "clients",
    request_body = crate::openapi::ClientRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Name already taken", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(input): ApiJson<ClientInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    let fields = input.validate().map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    state.services.clients.create(fields).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    put, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::ClientRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ClientDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ClientInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    let fields = input.validate().map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    state
        .services
        .clients
        .update(id, fields)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    delete, path = "/api/clients/{id}", tag = "clients",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Client still has deposits", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.services.clients.delete(id).await.map_err(|e| JsonApiError::from_service(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
