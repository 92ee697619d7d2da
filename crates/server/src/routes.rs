use std::any::Any;

use axum::extract::{OriginalUri, Request};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod banks;
pub mod clients;
pub mod deposits;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Unmatched paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("no route for {}", uri.path()))).at(uri.path())
}

/// Marks a response produced by a panicking handler.
#[derive(Debug, Clone)]
struct Panicked(String);

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    res.extensions_mut().insert(Panicked(detail));
    res
}

/// Renders the bodiless responses axum and the panic catcher produce
/// (405 and panics) as the standard error payload.
async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let mut res = next.run(req).await;

    if let Some(Panicked(detail)) = res.extensions_mut().remove::<Panicked>() {
        return JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(detail))
            .at(path)
            .into_response();
    }
    if res.status() == StatusCode::METHOD_NOT_ALLOWED {
        let allow = res.headers().get(header::ALLOW).cloned();
        let message = format!("method {method} is not allowed on {path}");
        let mut rendered =
            JsonApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", Some(message)).at(path).into_response();
        if let Some(allow) = allow {
            rendered.headers_mut().insert(header::ALLOW, allow);
        }
        return rendered;
    }
    res
}

/// Panic capture plus the error envelope; the envelope sits outside.
pub fn with_error_envelope(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(panic_response)).layer(middleware::from_fn(error_envelope))
}

/// Build the application router: operational endpoints plus the three resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = Router::new()
        .route("/api/banks", get(banks::list).post(banks::create))
        .route("/api/banks/:id", get(banks::get).put(banks::update).delete(banks::delete))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route("/api/clients/:id", get(clients::get).put(clients::update).delete(clients::delete))
        .route("/api/deposits", get(deposits::list).post(deposits::create))
        .route("/api/deposits/:id", get(deposits::get).put(deposits::update).delete(deposits::delete));

    let app = ops.merge(api).fallback(not_found).with_state(state);
    with_error_envelope(app)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
