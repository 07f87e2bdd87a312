use std::sync::Arc;

use aide::{
    axum::{routing::get_with, ApiRouter, IntoApiResponse},
    openapi::{OpenApi, Tag},
    redoc::Redoc,
    transform::TransformOpenApi,
};
use axum::{response::IntoResponse, routing::get, Extension, Json};

use crate::state::AppState;

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Tripboard API")
        .summary("Trip points and the catalog they refer to")
        .description("In-memory development backend for the tripboard client.")
        .tag(Tag {
            name: "Points".into(),
            description: Some("Trip point CRUD".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "Catalog".into(),
            description: Some("Destinations and offers".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "Health".into(),
            description: Some("Liveness".into()),
            ..Default::default()
        })
}

pub fn docs_routes() -> ApiRouter<AppState> {
    aide::gen::infer_responses(true);

    let router = ApiRouter::new()
        .api_route(
            "/docs",
            get_with(
                Redoc::new("/docs/api.json")
                    .with_title("Tripboard API")
                    .axum_handler(),
                |op| op.description("This documentation page."),
            ),
        )
        .route("/docs/api.json", get(serve_docs));

    aide::gen::infer_responses(false);

    router
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(&*api).into_response()
}
