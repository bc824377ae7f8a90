mod booking_api;
mod fare_api;
mod helpers;
mod route_api;
mod vehicle_api;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    api::API,
    config::Config,
    entities::Booking,
    error::{route_unavailable_error, Error},
    external::{DirectionsProvider, GoogleMaps},
};

type Bookings = HashMap<Uuid, Booking>;

/// Open bookings kept in memory before the least recently touched is evicted.
pub const DEFAULT_BOOKING_CAPACITY: usize = 10_000;

pub struct Engine {
    bookings: RwLock<Bookings>,
    booking_capacity: usize,
    directions: Option<Arc<dyn DirectionsProvider>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(directions: Option<Arc<dyn DirectionsProvider>>) -> Self {
        if directions.is_none() {
            tracing::warn!("no directions provider; fares need route metrics from the client");
        }

        Self {
            bookings: RwLock::new(HashMap::new()),
            booking_capacity: DEFAULT_BOOKING_CAPACITY,
            directions,
        }
    }

    pub fn with_booking_capacity(mut self, capacity: usize) -> Self {
        self.booking_capacity = capacity.max(1);
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let directions = config
            .google_maps
            .as_ref()
            .map(|google_maps| Arc::new(GoogleMaps::new(google_maps)) as Arc<dyn DirectionsProvider>);

        Self::new(directions)
    }

    fn directions(&self) -> Result<&dyn DirectionsProvider, Error> {
        self.directions
            .as_deref()
            .ok_or_else(route_unavailable_error)
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) mod stub {
    use async_trait::async_trait;

    use crate::{
        entities::{Coordinates, RouteMetrics},
        error::{route_not_found_error, Error},
        external::DirectionsProvider,
    };

    /// Answers every lookup with a fixed 5 km / 10 min route, except for
    /// destinations named "nowhere".
    pub struct StubDirections;

    #[async_trait]
    impl DirectionsProvider for StubDirections {
        async fn find_route(&self, _origin: &str, destination: &str) -> Result<RouteMetrics, Error> {
            if destination == "nowhere" {
                return Err(route_not_found_error());
            }

            RouteMetrics::from_leg(5000, 600, "5.0 km".into(), "10 mins".into())
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Option<String>, Error> {
            Ok(Some("1 Martin Place, Sydney".into()))
        }
    }
}

#[test]
fn engine_without_provider_reports_route_unavailable() {
    let engine = Engine::new(None);

    assert_eq!(engine.directions().err().map(|err| err.code), Some(6));
}

#[test]
fn engine_from_config_wires_google_maps() {
    let config = Config::from_lookup(|key| match key {
        "GOOGLE_MAPS_API_KEY" => Some("key".into()),
        _ => None,
    })
    .unwrap();

    assert!(Engine::from_config(&config).directions().is_ok());
}
