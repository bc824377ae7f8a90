use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ReverseParams {
    lat: f64,
    lng: f64,
}

#[derive(Serialize, Deserialize)]
pub struct Address {
    address: Option<String>,
}

pub async fn reverse(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<Address>, Error> {
    let address = api
        .locate(Coordinates {
            lat: params.lat,
            lng: params.lng,
        })
        .await?;

    Ok(Address { address }.into())
}
