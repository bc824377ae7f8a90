pub mod bookings;
pub mod fares;
pub mod locations;
pub mod routes;
pub mod vehicles;
