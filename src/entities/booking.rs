use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{FareCalculationResult, FormattedFare, RouteMetrics, VehicleKind};
use crate::error::{invalid_input_error, invalid_state_error, Error};
use crate::fare::compute_fare;

pub const BOOKED_MESSAGE: &str = "Ride booked successfully! Your driver will arrive shortly.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub step: Step,
    pub pickup: String,
    pub destination: String,
    pub vehicle: VehicleKind,
    pub route: Option<RouteMetrics>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Form,
    Vehicles,
    Confirmation,
}

impl Step {
    pub fn name(&self) -> String {
        match self {
            Self::Form => "form".into(),
            Self::Vehicles => "vehicles".into(),
            Self::Confirmation => "confirmation".into(),
        }
    }
}

/// What the rider is shown as the price of the selected ride.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceEstimate {
    Fare {
        route: RouteMetrics,
        fare: FareCalculationResult,
        formatted: FormattedFare,
    },
    Range {
        price_range: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub booking_id: Uuid,
    pub pickup: String,
    pub destination: String,
    pub vehicle: VehicleKind,
    pub price: PriceEstimate,
    pub message: String,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::Form,
            pickup: String::new(),
            destination: String::new(),
            vehicle: VehicleKind::default(),
            route: None,
            updated_at: Utc::now(),
        }
    }

    #[tracing::instrument(skip(self), fields(id = %self.id, step = ?self.step))]
    pub fn submit_locations(&mut self, pickup: &str, destination: &str) -> Result<(), Error> {
        if self.step != Step::Form {
            return Err(invalid_state_error());
        }

        let pickup = pickup.trim();
        let destination = destination.trim();

        if pickup.is_empty() || destination.is_empty() {
            return Err(invalid_input_error());
        }

        if pickup != self.pickup || destination != self.destination {
            self.route = None;
        }

        self.pickup = pickup.into();
        self.destination = destination.into();
        self.step = Step::Vehicles;
        self.touch();

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %self.id, step = ?self.step))]
    pub fn select_vehicle(&mut self, vehicle: VehicleKind) -> Result<(), Error> {
        match self.step {
            Step::Vehicles => {
                self.vehicle = vehicle;
                self.step = Step::Confirmation;
                self.touch();
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(id = %self.id, step = ?self.step))]
    pub fn back(&mut self) -> Result<(), Error> {
        self.step = match self.step {
            Step::Vehicles => Step::Form,
            Step::Confirmation => Step::Vehicles,
            Step::Form => return Err(invalid_state_error()),
        };
        self.touch();

        Ok(())
    }

    /// Route results arrive independently of the wizard step, but only once
    /// both locations are known.
    #[tracing::instrument(skip(self, route), fields(id = %self.id))]
    pub fn attach_route(&mut self, route: RouteMetrics) -> Result<(), Error> {
        if !self.has_locations() {
            return Err(invalid_state_error());
        }

        self.route = Some(route);
        self.touch();

        Ok(())
    }

    pub fn has_locations(&self) -> bool {
        !self.pickup.is_empty() && !self.destination.is_empty()
    }

    pub fn estimate(&self) -> Result<Option<FareCalculationResult>, Error> {
        self.route
            .as_ref()
            .map(|route| compute_fare(route.duration_minutes, route.distance_km))
            .transpose()
    }

    pub fn price(&self) -> Result<PriceEstimate, Error> {
        let price = match (self.estimate()?, &self.route) {
            (Some(fare), Some(route)) => PriceEstimate::Fare {
                route: route.clone(),
                formatted: FormattedFare::from(&fare),
                fare,
            },
            _ => PriceEstimate::Range {
                price_range: self.vehicle.details().price_range.into(),
            },
        };

        Ok(price)
    }

    /// Books the ride and resets the wizard for the next one.
    #[tracing::instrument(skip(self), fields(id = %self.id, step = ?self.step))]
    pub fn book(&mut self) -> Result<Receipt, Error> {
        if self.step != Step::Confirmation {
            return Err(invalid_state_error());
        }

        let receipt = Receipt {
            booking_id: self.id,
            pickup: self.pickup.clone(),
            destination: self.destination.clone(),
            vehicle: self.vehicle,
            price: self.price()?,
            message: BOOKED_MESSAGE.into(),
            booked_at: Utc::now(),
        };

        self.step = Step::Form;
        self.pickup.clear();
        self.destination.clear();
        self.route = None;
        self.touch();

        Ok(receipt)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Booking {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn walks_through_the_wizard() {
    let mut booking = Booking::new();
    assert_eq!(booking.step, Step::Form);

    booking.submit_locations("Central Station", "Airport").unwrap();
    assert_eq!(booking.step, Step::Vehicles);

    booking.select_vehicle(VehicleKind::Suv).unwrap();
    assert_eq!(booking.step, Step::Confirmation);

    let receipt = booking.book().unwrap();
    assert_eq!(receipt.pickup, "Central Station");
    assert_eq!(receipt.destination, "Airport");
    assert_eq!(receipt.vehicle, VehicleKind::Suv);
    assert_eq!(receipt.message, BOOKED_MESSAGE);

    assert_eq!(booking.step, Step::Form);
    assert!(booking.pickup.is_empty());
    assert!(booking.destination.is_empty());
}

#[test]
fn blank_locations_are_rejected() {
    let mut booking = Booking::new();

    assert_eq!(booking.submit_locations("  ", "Airport").unwrap_err().code, 101);
    assert_eq!(booking.submit_locations("Home", "").unwrap_err().code, 101);
    assert_eq!(booking.step, Step::Form);
}

#[test]
fn wrong_step_transitions_are_rejected() {
    let mut booking = Booking::new();

    assert_eq!(booking.select_vehicle(VehicleKind::Maxi).unwrap_err().code, 100);
    assert_eq!(booking.back().unwrap_err().code, 100);
    assert_eq!(booking.book().unwrap_err().code, 100);

    booking.submit_locations("Home", "Work").unwrap();
    assert_eq!(booking.book().unwrap_err().code, 100);
    assert_eq!(booking.submit_locations("Home", "Work").unwrap_err().code, 100);
}

#[test]
fn back_retraces_steps() {
    let mut booking = Booking::new();
    booking.submit_locations("Home", "Work").unwrap();
    booking.select_vehicle(VehicleKind::Premium).unwrap();

    booking.back().unwrap();
    assert_eq!(booking.step, Step::Vehicles);

    booking.back().unwrap();
    assert_eq!(booking.step, Step::Form);
    assert_eq!(booking.pickup, "Home");
}

#[test]
fn price_falls_back_to_vehicle_range_without_a_route() {
    let mut booking = Booking::new();
    booking.submit_locations("Home", "Work").unwrap();
    booking.select_vehicle(VehicleKind::Maxi).unwrap();

    assert_eq!(booking.estimate().unwrap(), None);
    assert_eq!(
        booking.price().unwrap(),
        PriceEstimate::Range {
            price_range: "$25-30".into()
        }
    );
}

#[test]
fn price_uses_fare_once_route_is_known() {
    use rust_decimal_macros::dec;

    let mut booking = Booking::new();
    booking.submit_locations("Home", "Work").unwrap();
    booking
        .attach_route(RouteMetrics::parse("5 km", "10 mins").unwrap())
        .unwrap();

    match booking.price().unwrap() {
        PriceEstimate::Fare {
            fare, formatted, ..
        } => {
            assert_eq!(fare.total, dec!(10.83));
            assert_eq!(formatted.total, "$10.83");
            assert_eq!(formatted.time_fare, "$3.20");
        }
        other => panic!("unexpected price {:?}", other),
    }
}

#[test]
fn route_requires_locations() {
    let mut booking = Booking::new();
    let route = RouteMetrics::new(5.0, 10.0).unwrap();

    assert_eq!(booking.attach_route(route).unwrap_err().code, 100);
}

#[test]
fn changing_locations_drops_the_route() {
    let mut booking = Booking::new();
    booking.submit_locations("Home", "Work").unwrap();
    booking.attach_route(RouteMetrics::new(5.0, 10.0).unwrap()).unwrap();

    booking.back().unwrap();
    booking.submit_locations("Home", "Work").unwrap();
    assert!(booking.route.is_some());

    booking.back().unwrap();
    booking.submit_locations("Home", "Gym").unwrap();
    assert!(booking.route.is_none());
}
