use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tripboard_core::{
    Destination, NewPoint, OfferCatalog, Point, PointId, ServerDestination, ServerOfferGroup,
    ServerPoint,
};

use crate::gateway::{Gateway, GatewayError};

/// HTTP implementation of [`Gateway`] talking to the trip REST API
pub struct ApiGateway {
    client: Client,
    base_url: String,
    authorization: String,
}

impl ApiGateway {
    pub fn new(base_url: &str, authorization: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!("tripboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| GatewayError::Transport {
                path: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: authorization.to_string(),
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&ServerPoint>,
    ) -> Result<Response, GatewayError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned {}", method, url, status);
            return Err(GatewayError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn load<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&ServerPoint>,
    ) -> Result<T, GatewayError> {
        self.send(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode {
                path: path.to_string(),
                source,
            })
    }
}

#[async_trait(?Send)]
impl Gateway for ApiGateway {
    async fn list_points(&self) -> Result<Vec<Point>, GatewayError> {
        let points: Vec<ServerPoint> = self.load(Method::GET, "points", None).await?;
        debug!("Received {} points from server", points.len());

        points
            .into_iter()
            .map(|p| Point::try_from(p).map_err(GatewayError::from))
            .collect()
    }

    /// Degrades to an empty list; destinations are not essential to the board
    async fn list_destinations(&self) -> Result<Vec<Destination>, GatewayError> {
        match self
            .load::<Vec<ServerDestination>>(Method::GET, "destinations", None)
            .await
        {
            Ok(destinations) => {
                debug!("Received {} destinations from server", destinations.len());
                Ok(destinations.into_iter().map(Destination::from).collect())
            }
            Err(e) => {
                warn!("Failed to fetch destinations: {}", e);
                Ok(vec![])
            }
        }
    }

    /// Degrades to an empty catalog, like destinations
    async fn list_offer_catalog(&self) -> Result<OfferCatalog, GatewayError> {
        match self
            .load::<Vec<ServerOfferGroup>>(Method::GET, "offers", None)
            .await
        {
            Ok(groups) => Ok(OfferCatalog::from(groups)),
            Err(e) => {
                warn!("Failed to fetch offers: {}", e);
                Ok(OfferCatalog::default())
            }
        }
    }

    async fn create_point(&self, point: &NewPoint) -> Result<Point, GatewayError> {
        let body = ServerPoint::from(point);
        let created: ServerPoint = self.load(Method::POST, "points", Some(&body)).await?;
        Ok(Point::try_from(created)?)
    }

    async fn update_point(&self, point: &Point) -> Result<Point, GatewayError> {
        let body = ServerPoint::from(point);
        let path = format!("points/{}", point.id);
        let updated: ServerPoint = self.load(Method::PUT, &path, Some(&body)).await?;
        Ok(Point::try_from(updated)?)
    }

    async fn delete_point(&self, id: &PointId) -> Result<(), GatewayError> {
        let path = format!("points/{}", id);
        self.send(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
