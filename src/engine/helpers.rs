use uuid::Uuid;

use super::Bookings;
use crate::{
    entities::Booking,
    error::{not_found_error, Error},
};

pub fn fetch_booking(bookings: &Bookings, id: &Uuid) -> Result<Booking, Error> {
    bookings.get(id).cloned().ok_or_else(not_found_error)
}

pub fn fetch_booking_for_update<'a>(
    bookings: &'a mut Bookings,
    id: &Uuid,
) -> Result<&'a mut Booking, Error> {
    bookings.get_mut(id).ok_or_else(not_found_error)
}

/// Drops least recently updated bookings until one more fits in `capacity`.
pub fn make_room(bookings: &mut Bookings, capacity: usize) {
    while bookings.len() >= capacity {
        let oldest = bookings
            .values()
            .min_by_key(|booking| booking.updated_at)
            .map(|booking| booking.id);

        match oldest {
            Some(id) => {
                tracing::info!(%id, "evicting stale booking");
                bookings.remove(&id);
            }
            None => break,
        }
    }
}
