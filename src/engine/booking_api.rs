use super::helpers::{fetch_booking, fetch_booking_for_update, make_room};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{BookingAPI, RouteAPI},
    entities::{Booking, PriceEstimate, Receipt, RouteMetrics, VehicleKind},
    error::{invalid_state_error, Error},
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self) -> Result<Booking, Error> {
        let booking = Booking::new();

        let mut bookings = self.bookings.write().await;
        make_room(&mut bookings, self.booking_capacity);
        bookings.insert(booking.id, booking.clone());

        tracing::info!(id = %booking.id, "booking created");

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let bookings = self.bookings.read().await;

        fetch_booking(&bookings, &id)
    }

    #[tracing::instrument(skip(self))]
    async fn submit_locations(
        &self,
        id: Uuid,
        pickup: String,
        destination: String,
    ) -> Result<Booking, Error> {
        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        booking.submit_locations(&pickup, &destination)?;

        Ok(booking.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn attach_route(
        &self,
        id: Uuid,
        distance: String,
        duration: String,
    ) -> Result<Booking, Error> {
        let route = RouteMetrics::parse(&distance, &duration)?;

        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        booking.attach_route(route)?;

        Ok(booking.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn calculate_booking_route(&self, id: Uuid) -> Result<Booking, Error> {
        let (pickup, destination) = {
            let bookings = self.bookings.read().await;
            let booking = fetch_booking(&bookings, &id)?;

            if !booking.has_locations() {
                return Err(invalid_state_error());
            }

            (booking.pickup, booking.destination)
        };

        // the lock is not held across the provider call
        let route = self
            .calculate_route(pickup.clone(), destination.clone())
            .await?;

        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        // locations changed while the route was being looked up
        if booking.pickup != pickup || booking.destination != destination {
            return Err(invalid_state_error());
        }

        booking.attach_route(route)?;

        Ok(booking.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn select_vehicle(&self, id: Uuid, vehicle: VehicleKind) -> Result<Booking, Error> {
        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        booking.select_vehicle(vehicle)?;

        Ok(booking.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn go_back(&self, id: Uuid) -> Result<Booking, Error> {
        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        booking.back()?;

        Ok(booking.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn price_booking(&self, id: Uuid) -> Result<PriceEstimate, Error> {
        let bookings = self.bookings.read().await;

        fetch_booking(&bookings, &id)?.price()
    }

    #[tracing::instrument(skip(self))]
    async fn confirm_booking(&self, id: Uuid) -> Result<Receipt, Error> {
        let mut bookings = self.bookings.write().await;
        let booking = fetch_booking_for_update(&mut bookings, &id)?;

        let receipt = booking.book()?;

        tracing::info!(
            id = %receipt.booking_id,
            vehicle = ?receipt.vehicle,
            step = %booking.step.name(),
            "ride booked"
        );

        // a booked ride has nothing left to show
        bookings.remove(&id);

        Ok(receipt)
    }
}

#[test]
fn books_a_ride_with_a_calculated_route() {
    use super::stub::StubDirections;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Some(Arc::new(StubDirections)));
    let id = block_on(engine.create_booking()).unwrap().id;

    block_on(engine.submit_locations(id, "Home".into(), "Work".into())).unwrap();
    let booking = block_on(engine.calculate_booking_route(id)).unwrap();
    assert!(booking.route.is_some());

    block_on(engine.select_vehicle(id, VehicleKind::Premium)).unwrap();

    let receipt = block_on(engine.confirm_booking(id)).unwrap();
    match receipt.price {
        PriceEstimate::Fare { fare, .. } => assert_eq!(fare.total, dec!(10.83)),
        other => panic!("unexpected price {:?}", other),
    }

    assert_eq!(block_on(engine.find_booking(id)).unwrap_err().code, 103);
}

#[test]
fn confirmed_bookings_are_evicted() {
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let id = block_on(engine.create_booking()).unwrap().id;
    let other = block_on(engine.create_booking()).unwrap().id;

    block_on(engine.submit_locations(id, "Home".into(), "Work".into())).unwrap();
    block_on(engine.select_vehicle(id, VehicleKind::Sedan)).unwrap();
    block_on(engine.confirm_booking(id)).unwrap();

    assert_eq!(block_on(engine.find_booking(id)).unwrap_err().code, 103);
    assert_eq!(block_on(engine.confirm_booking(id)).unwrap_err().code, 103);
    assert!(block_on(engine.find_booking(other)).is_ok());
}

#[test]
fn stale_bookings_are_evicted_at_capacity() {
    use tokio_test::block_on;

    let engine = Engine::new(None).with_booking_capacity(2);
    let first = block_on(engine.create_booking()).unwrap().id;
    let second = block_on(engine.create_booking()).unwrap().id;

    // touching the first makes the second the stalest
    std::thread::sleep(std::time::Duration::from_millis(5));
    block_on(engine.submit_locations(first, "Home".into(), "Work".into())).unwrap();

    let third = block_on(engine.create_booking()).unwrap().id;

    assert!(block_on(engine.find_booking(first)).is_ok());
    assert_eq!(block_on(engine.find_booking(second)).unwrap_err().code, 103);
    assert!(block_on(engine.find_booking(third)).is_ok());
    assert_eq!(engine.bookings.try_read().unwrap().len(), 2);
}

#[test]
fn failed_route_leaves_the_price_range() {
    use super::stub::StubDirections;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = Engine::new(Some(Arc::new(StubDirections)));
    let id = block_on(engine.create_booking()).unwrap().id;

    block_on(engine.submit_locations(id, "Home".into(), "nowhere".into())).unwrap();
    assert_eq!(
        block_on(engine.calculate_booking_route(id)).unwrap_err().code,
        104
    );

    block_on(engine.select_vehicle(id, VehicleKind::Accessible)).unwrap();
    assert_eq!(
        block_on(engine.price_booking(id)).unwrap(),
        PriceEstimate::Range {
            price_range: "$15-18".into()
        }
    );
}

#[test]
fn route_text_from_the_client_is_parsed() {
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let id = block_on(engine.create_booking()).unwrap().id;

    block_on(engine.submit_locations(id, "Home".into(), "Work".into())).unwrap();
    let booking = block_on(engine.attach_route(id, "12.5 km".into(), "18 mins".into())).unwrap();

    let route = booking.route.unwrap();
    assert_eq!(route.distance_km, 12.5);
    assert_eq!(route.duration_minutes, 18.0);

    assert_eq!(
        block_on(engine.attach_route(id, "far".into(), "18 mins".into()))
            .unwrap_err()
            .code,
        101
    );
}

#[test]
fn unknown_bookings_are_not_found() {
    use tokio_test::block_on;

    let engine = Engine::new(None);

    assert_eq!(
        block_on(engine.find_booking(Uuid::new_v4())).unwrap_err().code,
        103
    );
    assert_eq!(
        block_on(engine.go_back(Uuid::new_v4())).unwrap_err().code,
        103
    );
}

#[test]
fn back_and_forth_between_steps() {
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let id = block_on(engine.create_booking()).unwrap().id;

    block_on(engine.submit_locations(id, "Home".into(), "Work".into())).unwrap();
    block_on(engine.select_vehicle(id, VehicleKind::Maxi)).unwrap();

    let booking = block_on(engine.go_back(id)).unwrap();
    assert_eq!(booking.step, crate::entities::Step::Vehicles);
    assert_eq!(booking.vehicle, VehicleKind::Maxi);

    assert_eq!(block_on(engine.confirm_booking(id)).unwrap_err().code, 100);
}
