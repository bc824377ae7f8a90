mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{bookings, fares, locations, routes, vehicles};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/fares", post(fares::create))
        .route("/vehicles", get(vehicles::list))
        .route("/routes", post(routes::create))
        .route("/routes/parse", post(routes::parse))
        .route("/locations/reverse", get(locations::reverse))
        .route("/bookings", post(bookings::create))
        .route("/bookings/:id", get(bookings::find))
        .route("/bookings/:id/locations", patch(bookings::submit_locations))
        .route("/bookings/:id/route", patch(bookings::attach_route))
        .route(
            "/bookings/:id/route/calculate",
            post(bookings::calculate_route),
        )
        .route("/bookings/:id/vehicle", patch(bookings::select_vehicle))
        .route("/bookings/:id/back", patch(bookings::back))
        .route("/bookings/:id/price", get(bookings::price))
        .route("/bookings/:id/confirm", post(bookings::confirm))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server error");
            unexpected_error()
        })
}
