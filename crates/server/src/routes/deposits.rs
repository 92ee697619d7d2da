use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use models::deposit::DepositDetails;
use serde::Deserialize;
use service::domain::DepositInput;
use service::query::DepositCriteria;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DepositListQuery {
    pub client_id: Option<i32>,
    pub bank_id: Option<i32>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub opening_date_from: Option<NaiveDate>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub opening_date_to: Option<NaiveDate>,
    pub min_percentage: Option<f64>,
    pub max_percentage: Option<f64>,
    pub min_term: Option<i32>,
    pub max_term: Option<i32>,
    /// `id`, `clientId`, `bankId`, `openingDate`, `percentage` or `termMonths`
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl DepositListQuery {
    fn criteria(&self) -> DepositCriteria {
        DepositCriteria {
            client_id: self.client_id,
            bank_id: self.bank_id,
            opening_date_from: self.opening_date_from,
            opening_date_to: self.opening_date_to,
            min_percentage: self.min_percentage,
            max_percentage: self.max_percentage,
            min_term: self.min_term,
            max_term: self.max_term,
        }
    }
}

#[utoipa::path(
    get, path = "/api/deposits", tag = "deposits",
    params(DepositListQuery),
    responses(
        (status = 200, description = "Matching deposits", body = [crate::openapi::DepositDoc]),
        (status = 400, description = "Bad query parameter or sort field", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "No deposits match", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<DepositListQuery>,
) -> Result<Json<Vec<DepositDetails>>, JsonApiError> {
    state
        .services
        .deposits
        .list(q.criteria(), q.sort_by.as_deref(), q.direction.as_deref())
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    get, path = "/api/deposits/{id}", tag = "deposits",
    params(("id" = i32, Path, description = "Deposit id")),
    responses(
        (status = 200, description = "Deposit with client and bank", body = crate::openapi::DepositDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DepositDetails>, JsonApiError> {
    state.services.deposits.get(id).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    post, path = "/api/deposits", tag = "deposits",
    request_body = crate::openapi::DepositRequestDoc,
    responses(
        (status = 200, description = "Created; openingDate is set to today", body = crate::openapi::DepositDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Client or bank not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(input): ApiJson<DepositInput>,
) -> Result<Json<DepositDetails>, JsonApiError> {
    let deposits = &state.services.deposits;
    let fields = input.validate(deposits.today()).map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    deposits.create(fields).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    put, path = "/api/deposits/{id}", tag = "deposits",
    params(("id" = i32, Path, description = "Deposit id")),
    request_body = crate::openapi::DepositRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DepositDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Deposit, client or bank not found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<DepositInput>,
) -> Result<Json<DepositDetails>, JsonApiError> {
    let deposits = &state.services.deposits;
    let fields = input.validate(deposits.today()).map_err(|e| JsonApiError::from_validation(e, uri.path()))?;
    deposits.update(id, fields).await.map(Json).map_err(|e| JsonApiError::from_service(e, uri.path()))
}

#[utoipa::path(
    delete, path = "/api/deposits/{id}", tag = "deposits",
    params(("id" = i32, Path, description = "Deposit id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.services.deposits.delete(id).await.map_err(|e| JsonApiError::from_service(e, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
