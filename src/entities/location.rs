use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid_input_error());
        }

        Ok(Self { lat, lng })
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

#[test]
fn coordinates_render_as_latlng_pair() {
    let coordinates = Coordinates::new(-33.8688, 151.2093).unwrap();
    let latlng: String = coordinates.into();

    assert_eq!(latlng, "-33.8688,151.2093");
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    assert!(Coordinates::new(91.0, 0.0).is_err());
    assert!(Coordinates::new(0.0, -180.5).is_err());
    assert!(Coordinates::new(f64::NAN, 0.0).is_err());
}
