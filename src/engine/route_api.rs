use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{Coordinates, RouteMetrics},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl RouteAPI for Engine {
    /// Single attempt; failures are logged and handed back to the caller,
    /// which falls back to the vehicle's static price range.
    #[tracing::instrument(skip(self))]
    async fn calculate_route(
        &self,
        pickup: String,
        destination: String,
    ) -> Result<RouteMetrics, Error> {
        if pickup.trim().is_empty() || destination.trim().is_empty() {
            return Err(invalid_input_error());
        }

        let directions = self.directions()?;

        directions
            .find_route(pickup.trim(), destination.trim())
            .await
            .map_err(|err| {
                tracing::warn!(%err, "route calculation failed");
                err
            })
    }

    #[tracing::instrument(skip(self))]
    async fn parse_route(&self, distance: String, duration: String) -> Result<RouteMetrics, Error> {
        RouteMetrics::parse(&distance, &duration)
    }

    #[tracing::instrument(skip(self))]
    async fn locate(&self, coordinates: Coordinates) -> Result<Option<String>, Error> {
        let coordinates = Coordinates::new(coordinates.lat, coordinates.lng)?;

        self.directions()?
            .reverse_geocode(coordinates)
            .await
            .map_err(|err| {
                tracing::warn!(%err, "reverse geocoding failed");
                err
            })
    }
}

#[test]
fn calculates_route_through_provider() {
    use super::stub::StubDirections;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Some(Arc::new(StubDirections)));
    let route = block_on(engine.calculate_route("Home".into(), "Work".into())).unwrap();

    assert_eq!(route.distance_km, 5.0);
    assert_eq!(route.duration_minutes, 10.0);
}

#[test]
fn provider_failures_are_returned() {
    use super::stub::StubDirections;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Some(Arc::new(StubDirections)));
    let err = block_on(engine.calculate_route("Home".into(), "nowhere".into())).unwrap_err();

    assert_eq!(err.code, 104);
}

#[test]
fn route_needs_a_provider() {
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let err = block_on(engine.calculate_route("Home".into(), "Work".into())).unwrap_err();

    assert_eq!(err.code, 6);
}

#[test]
fn parses_route_text() {
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let route = block_on(engine.parse_route("1,200 m".into(), "1 hour 5 mins".into())).unwrap();

    assert_eq!(route.distance_km, 1.2);
    assert_eq!(route.duration_minutes, 65.0);
}

#[test]
fn locates_valid_coordinates_only() {
    use super::stub::StubDirections;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Some(Arc::new(StubDirections)));

    let address = block_on(engine.locate(Coordinates {
        lat: -33.8675,
        lng: 151.207,
    }))
    .unwrap();
    assert_eq!(address.as_deref(), Some("1 Martin Place, Sydney"));

    let err = block_on(engine.locate(Coordinates {
        lat: 120.0,
        lng: 0.0,
    }))
    .unwrap_err();
    assert_eq!(err.code, 101);
}
