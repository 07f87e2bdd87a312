use aide::{
    axum::{
        routing::{get_with, put_with},
        ApiRouter, IntoApiResponse,
    },
    transform::TransformOperation,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    errors::RestResult,
    model::point::PointDto,
    state::AppState,
};

pub fn point_routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route(
            "/points",
            get_with(list_points, list_points_docs).post_with(create_point, create_point_docs),
        )
        .api_route(
            "/points/:id",
            put_with(update_point, update_point_docs).delete_with(delete_point, delete_point_docs),
        )
}

async fn list_points(State(state): State<AppState>) -> impl IntoApiResponse {
    let result: RestResult<Vec<PointDto>> = state
        .store()
        .map(|store| store.points().iter().map(PointDto::from).collect());

    match result {
        Ok(points) => Json(points).into_response(),
        Err(e) => e.into_response(),
    }
}

fn list_points_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List points")
        .description("Every stored point, in insertion order")
        .tag("Points")
        .response::<200, Json<Vec<PointDto>>>()
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
}

async fn create_point(
    State(state): State<AppState>,
    Json(payload): Json<PointDto>,
) -> impl IntoApiResponse {
    let result = state
        .store()
        .and_then(|mut store| store.create_point(payload));

    match result {
        Ok(point) => {
            info!("Created point {}", point.id);
            (StatusCode::CREATED, Json(PointDto::from(&point))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn create_point_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create point")
        .description("Store a new point; the id is assigned by the server")
        .tag("Points")
        .response::<201, Json<PointDto>>()
        .response_with::<400, (), _>(|res| res.description("Invalid point"))
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
}

async fn update_point(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PointDto>,
) -> impl IntoApiResponse {
    let result = state
        .store()
        .and_then(|mut store| store.update_point(&id, payload));

    match result {
        Ok(point) => Json(PointDto::from(&point)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn update_point_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update point")
        .description("Replace a stored point; any id in the body is ignored")
        .tag("Points")
        .response::<200, Json<PointDto>>()
        .response_with::<400, (), _>(|res| res.description("Invalid point"))
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
        .response_with::<404, (), _>(|res| res.description("Point not found"))
}

async fn delete_point(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoApiResponse {
    let result = state.store().and_then(|mut store| store.delete_point(&id));

    match result {
        Ok(id) => {
            info!("Deleted point {}", id);
            StatusCode::OK.into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn delete_point_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete point")
        .tag("Points")
        .response::<200, ()>()
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
        .response_with::<404, (), _>(|res| res.description("Point not found"))
}
