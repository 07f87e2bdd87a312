use serde::{Deserialize, Serialize};
use tripboard_core::{Destination, EventType, Offer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PictureDto {
    pub src: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DestinationDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pictures: Vec<PictureDto>,
}

impl From<&Destination> for DestinationDto {
    fn from(destination: &Destination) -> Self {
        DestinationDto {
            id: destination.id.to_string(),
            name: destination.name.clone(),
            description: destination.description.clone(),
            pictures: destination
                .pictures
                .iter()
                .map(|p| PictureDto {
                    src: p.src.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OfferDto {
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// Offers available for one event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OfferGroupDto {
    #[serde(rename = "type")]
    pub event_type: String,
    pub offers: Vec<OfferDto>,
}

impl OfferGroupDto {
    pub fn new(event_type: EventType, offers: &[Offer]) -> Self {
        OfferGroupDto {
            event_type: event_type.wire_name().to_string(),
            offers: offers
                .iter()
                .map(|o| OfferDto {
                    id: o.id.to_string(),
                    title: o.title.clone(),
                    price: o.price,
                })
                .collect(),
        }
    }
}
