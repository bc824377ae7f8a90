use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Booking, Coordinates, FareQuote, PriceEstimate, Receipt, RouteMetrics, VehicleKind,
    VehicleType,
};
use crate::error::Error;

#[async_trait]
pub trait FareAPI {
    async fn quote_fare(&self, duration_minutes: f64, distance_km: f64) -> Result<FareQuote, Error>;
}

#[async_trait]
pub trait VehicleAPI {
    async fn list_vehicles(&self) -> Result<Vec<VehicleType>, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn calculate_route(&self, pickup: String, destination: String)
        -> Result<RouteMetrics, Error>;
    async fn parse_route(&self, distance: String, duration: String) -> Result<RouteMetrics, Error>;
    async fn locate(&self, coordinates: Coordinates) -> Result<Option<String>, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self) -> Result<Booking, Error>;
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error>;
    async fn submit_locations(
        &self,
        id: Uuid,
        pickup: String,
        destination: String,
    ) -> Result<Booking, Error>;
    async fn attach_route(&self, id: Uuid, distance: String, duration: String)
        -> Result<Booking, Error>;
    async fn calculate_booking_route(&self, id: Uuid) -> Result<Booking, Error>;
    async fn select_vehicle(&self, id: Uuid, vehicle: VehicleKind) -> Result<Booking, Error>;
    async fn go_back(&self, id: Uuid) -> Result<Booking, Error>;
    async fn price_booking(&self, id: Uuid) -> Result<PriceEstimate, Error>;
    async fn confirm_booking(&self, id: Uuid) -> Result<Receipt, Error>;
}

pub trait API: FareAPI + VehicleAPI + RouteAPI + BookingAPI {}
