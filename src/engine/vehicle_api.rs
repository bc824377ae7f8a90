use super::Engine;

use async_trait::async_trait;

use crate::{
    api::VehicleAPI,
    entities::{catalogue, VehicleType},
    error::Error,
};

#[async_trait]
impl VehicleAPI for Engine {
    async fn list_vehicles(&self) -> Result<Vec<VehicleType>, Error> {
        Ok(catalogue())
    }
}
