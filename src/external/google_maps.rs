use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::DirectionsProvider;
use crate::{
    config::GoogleMapsConfig,
    entities::{Coordinates, RouteMetrics},
    error::{invalid_input_error, route_not_found_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    routes: Option<Vec<T>>,
    results: Option<Vec<T>>,
}

#[derive(Clone)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl std::fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GoogleMaps {
    pub fn new(config: &GoogleMapsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response<T>, Error> {
        let url = format!("https://{}/maps/api/{}/json", self.api_base, path);

        let res = self
            .client
            .get(url)
            .query(&[("key", &self.api_key)])
            .query(query)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn find_route(&self, origin: &str, destination: &str) -> Result<RouteMetrics, Error> {
        let data: Response<DirectionsRoute> = self
            .get(
                "directions",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("mode", "driving".to_string()),
                ],
            )
            .await?;

        route_metrics(data)
    }

    #[tracing::instrument(skip(self))]
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Option<String>, Error> {
        let latlng: String = coordinates.into();
        let data: Response<GeocodeResult> = self.get("geocode", &[("latlng", latlng)]).await?;

        first_address(data)
    }
}

fn route_metrics(data: Response<DirectionsRoute>) -> Result<RouteMetrics, Error> {
    match data.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(route_not_found_error()),
        "INVALID_REQUEST" => return Err(invalid_input_error()),
        status => {
            tracing::warn!(status, "directions request failed");
            return Err(upstream_error());
        }
    }

    let leg = data
        .routes
        .and_then(|routes| routes.into_iter().next())
        .and_then(|route| route.legs.into_iter().next())
        .ok_or_else(route_not_found_error)?;

    RouteMetrics::from_leg(
        leg.distance.value,
        leg.duration.value,
        leg.distance.text,
        leg.duration.text,
    )
}

fn first_address(data: Response<GeocodeResult>) -> Result<Option<String>, Error> {
    match data.status.as_str() {
        "OK" => Ok(data
            .results
            .and_then(|results| results.into_iter().next())
            .map(|result| result.formatted_address)),
        "ZERO_RESULTS" => Ok(None),
        status => {
            tracing::warn!(status, "geocode request failed");
            Err(upstream_error())
        }
    }
}

#[test]
fn reads_first_leg_of_first_route() {
    let data: Response<DirectionsRoute> = serde_json::from_value(serde_json::json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "distance": { "text": "12.5 km", "value": 12500 },
                "duration": { "text": "18 mins", "value": 1080 }
            }]
        }]
    }))
    .unwrap();

    let metrics = route_metrics(data).unwrap();

    assert_eq!(metrics.distance_km, 12.5);
    assert_eq!(metrics.duration_minutes, 18.0);
    assert_eq!(metrics.duration_text, "18 mins");
}

#[test]
fn zero_results_is_route_not_found() {
    let data: Response<DirectionsRoute> =
        serde_json::from_value(serde_json::json!({ "status": "ZERO_RESULTS", "routes": [] }))
            .unwrap();

    assert_eq!(route_metrics(data).unwrap_err().code, 104);
}

#[test]
fn denied_requests_are_upstream_errors() {
    let data: Response<DirectionsRoute> =
        serde_json::from_value(serde_json::json!({ "status": "REQUEST_DENIED" })).unwrap();

    assert_eq!(route_metrics(data).unwrap_err().code, 4);
}

#[test]
fn geocode_returns_first_formatted_address() {
    let data: Response<GeocodeResult> = serde_json::from_value(serde_json::json!({
        "status": "OK",
        "results": [
            { "formatted_address": "1 Martin Place, Sydney NSW 2000, Australia" },
            { "formatted_address": "Sydney NSW, Australia" }
        ]
    }))
    .unwrap();

    assert_eq!(
        first_address(data).unwrap().as_deref(),
        Some("1 Martin Place, Sydney NSW 2000, Australia")
    );

    let data: Response<GeocodeResult> =
        serde_json::from_value(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }))
            .unwrap();
    assert_eq!(first_address(data).unwrap(), None);
}
