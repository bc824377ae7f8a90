use super::Engine;

use async_trait::async_trait;

use crate::{api::FareAPI, entities::FareQuote, error::Error, fare::compute_fare};

#[async_trait]
impl FareAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn quote_fare(&self, duration_minutes: f64, distance_km: f64) -> Result<FareQuote, Error> {
        let fare = compute_fare(duration_minutes, distance_km)?;

        Ok(FareQuote::new(fare))
    }
}

#[test]
fn quotes_fare_with_display_strings() {
    use rust_decimal_macros::dec;
    use tokio_test::block_on;

    let engine = Engine::new(None);
    let quote = block_on(engine.quote_fare(10.0, 5.0)).unwrap();

    assert_eq!(quote.fare.total, dec!(10.83));
    assert_eq!(quote.formatted.total, "$10.83");
    assert_eq!(quote.formatted.distance_fare, "$5.30");
}

#[test]
fn rejects_negative_metrics() {
    use tokio_test::block_on;

    let engine = Engine::new(None);

    assert_eq!(block_on(engine.quote_fare(-3.0, 5.0)).unwrap_err().code, 102);
}
