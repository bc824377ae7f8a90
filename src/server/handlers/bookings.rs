use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Booking, PriceEstimate, Receipt, VehicleKind};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LocationParams {
    pickup: String,
    destination: String,
}

#[derive(Serialize, Deserialize)]
pub struct RouteParams {
    distance: String,
    duration: String,
}

#[derive(Serialize, Deserialize)]
pub struct VehicleParams {
    vehicle: VehicleKind,
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<Booking>, Error> {
    let booking = api.create_booking().await?;

    Ok(booking.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(id).await?;

    Ok(booking.into())
}

pub async fn submit_locations(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<LocationParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api
        .submit_locations(id, params.pickup, params.destination)
        .await?;

    Ok(booking.into())
}

pub async fn attach_route(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<RouteParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api
        .attach_route(id, params.distance, params.duration)
        .await?;

    Ok(booking.into())
}

pub async fn calculate_route(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.calculate_booking_route(id).await?;

    Ok(booking.into())
}

pub async fn select_vehicle(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<VehicleParams>,
) -> Result<Json<Booking>, Error> {
    let booking = api.select_vehicle(id, params.vehicle).await?;

    Ok(booking.into())
}

pub async fn back(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.go_back(id).await?;

    Ok(booking.into())
}

pub async fn price(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<PriceEstimate>, Error> {
    let price = api.price_booking(id).await?;

    Ok(price.into())
}

pub async fn confirm(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Receipt>, Error> {
    let receipt = api.confirm_booking(id).await?;

    Ok(receipt.into())
}

#[test]
fn handlers_drive_the_booking_wizard() {
    use crate::engine::Engine;
    use std::sync::Arc;
    use tokio_test::block_on;

    let api = Arc::new(Engine::new(None)) as DynAPI;

    let Json(booking) = block_on(create(Extension(api.clone()))).unwrap();
    let id = booking.id;

    block_on(submit_locations(
        Extension(api.clone()),
        Path(id),
        Json(LocationParams {
            pickup: "Central Station".into(),
            destination: "Harbour Bridge".into(),
        }),
    ))
    .unwrap();

    block_on(attach_route(
        Extension(api.clone()),
        Path(id),
        Json(RouteParams {
            distance: "5 km".into(),
            duration: "10 mins".into(),
        }),
    ))
    .unwrap();

    block_on(select_vehicle(
        Extension(api.clone()),
        Path(id),
        Json(VehicleParams {
            vehicle: VehicleKind::Sedan,
        }),
    ))
    .unwrap();

    let Json(receipt) = block_on(confirm(Extension(api.clone()), Path(id))).unwrap();
    match receipt.price {
        PriceEstimate::Fare { formatted, .. } => assert_eq!(formatted.total, "$10.83"),
        other => panic!("unexpected price {:?}", other),
    }
}

#[test]
fn confirming_early_is_rejected() {
    use crate::engine::Engine;
    use std::sync::Arc;
    use tokio_test::block_on;

    let api = Arc::new(Engine::new(None)) as DynAPI;
    let Json(booking) = block_on(create(Extension(api.clone()))).unwrap();

    let err = block_on(confirm(Extension(api), Path(booking.id))).unwrap_err();

    assert_eq!(err.code, 100);
}
