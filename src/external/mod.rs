pub mod google_maps;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, RouteMetrics},
    error::Error,
};

pub use google_maps::GoogleMaps;

/// Source of driving routes and addresses for the booking flow.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn find_route(&self, origin: &str, destination: &str) -> Result<RouteMetrics, Error>;

    /// Formatted address nearest to `coordinates`, if any.
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Option<String>, Error>;
}
