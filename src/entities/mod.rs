mod booking;
mod fare;
mod location;
mod route;
mod vehicle;

pub use booking::{Booking, PriceEstimate, Receipt, Step, BOOKED_MESSAGE};
pub use fare::{FareBreakdown, FareCalculationResult, FareQuote, FormattedFare};
pub use location::Coordinates;
pub use route::{parse_distance_km, parse_duration_minutes, RouteMetrics};
pub use vehicle::{catalogue, VehicleKind, VehicleType};
