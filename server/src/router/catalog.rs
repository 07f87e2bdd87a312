use aide::{
    axum::{routing::get_with, ApiRouter, IntoApiResponse},
    transform::TransformOperation,
};
use axum::{extract::State, response::IntoResponse, Json};
use tripboard_core::EventType;

use crate::{
    errors::RestResult,
    model::catalog::{DestinationDto, OfferGroupDto},
    state::AppState,
};

pub fn catalog_routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/destinations", get_with(list_destinations, list_destinations_docs))
        .api_route("/offers", get_with(list_offers, list_offers_docs))
}

async fn list_destinations(State(state): State<AppState>) -> impl IntoApiResponse {
    let result: RestResult<Vec<DestinationDto>> = state
        .store()
        .map(|store| store.destinations().iter().map(DestinationDto::from).collect());

    match result {
        Ok(destinations) => Json(destinations).into_response(),
        Err(e) => e.into_response(),
    }
}

fn list_destinations_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List destinations")
        .description("All destinations a point can refer to")
        .tag("Catalog")
        .response::<200, Json<Vec<DestinationDto>>>()
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
}

async fn list_offers(State(state): State<AppState>) -> impl IntoApiResponse {
    let result: RestResult<Vec<OfferGroupDto>> = state.store().map(|store| {
        store
            .offers()
            .iter()
            .map(|(event_type, offers)| OfferGroupDto::new(*event_type, offers))
            .collect()
    });

    match result {
        Ok(groups) => Json(groups).into_response(),
        Err(e) => e.into_response(),
    }
}

fn list_offers_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List offers")
        .description(&format!(
            "Offers grouped by event type; one group for each of {} types",
            EventType::ALL.len()
        ))
        .tag("Catalog")
        .response::<200, Json<Vec<OfferGroupDto>>>()
        .response_with::<401, (), _>(|res| res.description("Missing Authorization header"))
}
