use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Extension, Router,
};
use catalog::catalog_routes;
use health::health_routes;
use openapi::{api_docs, docs_routes};
use points::point_routes;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    errors::RestError,
    state::{AppState, Store},
};

pub mod catalog;
pub mod health;
pub mod openapi;
pub mod points;

pub fn setup_router(store: Store) -> Router {
    aide::gen::on_error(|error| {
        tracing::warn!("{error}");
    });

    aide::gen::extract_schemas(true);
    let mut api = OpenApi::default();

    let app_state = AppState::new(store);

    // Health and docs stay public, the trip data needs an Authorization header
    let protected = ApiRouter::new()
        .merge(point_routes())
        .merge(catalog_routes())
        .layer(middleware::from_fn(require_authorization));

    ApiRouter::new()
        .merge(health_routes())
        .merge(protected)
        .merge(docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api)))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Any non-empty Authorization value is accepted
async fn require_authorization(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());

    if !authorized {
        return RestError::Unauthorized.into_response();
    }

    next.run(request).await
}
