use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::entities::FareQuote;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    duration_minutes: f64,
    distance_km: f64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<FareQuote>, Error> {
    let quote = api
        .quote_fare(params.duration_minutes, params.distance_km)
        .await?;

    Ok(quote.into())
}

#[test]
fn create_quotes_a_fare() {
    use crate::engine::Engine;
    use std::sync::Arc;
    use tokio_test::block_on;

    let api = Arc::new(Engine::new(None)) as DynAPI;
    let params = CreateParams {
        duration_minutes: 10.0,
        distance_km: 5.0,
    };

    let Json(quote) = block_on(create(Extension(api), Json(params))).unwrap();

    assert_eq!(quote.formatted.total, "$10.83");
}
