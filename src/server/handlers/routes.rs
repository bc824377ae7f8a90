use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::RouteMetrics;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    pickup: String,
    destination: String,
}

#[derive(Serialize, Deserialize)]
pub struct ParseParams {
    distance: String,
    duration: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<RouteMetrics>, Error> {
    let route = api
        .calculate_route(params.pickup, params.destination)
        .await?;

    Ok(route.into())
}

pub async fn parse(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ParseParams>,
) -> Result<Json<RouteMetrics>, Error> {
    let route = api.parse_route(params.distance, params.duration).await?;

    Ok(route.into())
}
