use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Sedan,
    Suv,
    Maxi,
    Accessible,
    Premium,
}

impl Default for VehicleKind {
    fn default() -> Self {
        Self::Sedan
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VehicleType {
    pub kind: VehicleKind,
    pub name: &'static str,
    /// Shown in place of a fare estimate when no route is known.
    pub price_range: &'static str,
    pub capacity: u8,
    pub eta_minutes: u32,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 5] = [
        VehicleKind::Sedan,
        VehicleKind::Suv,
        VehicleKind::Maxi,
        VehicleKind::Accessible,
        VehicleKind::Premium,
    ];

    pub fn details(&self) -> VehicleType {
        let (name, price_range, capacity, eta_minutes) = match self {
            Self::Sedan => ("Sedan", "$12-15", 4, 5),
            Self::Suv => ("SUV", "$18-22", 6, 7),
            Self::Maxi => ("Maxi", "$25-30", 8, 10),
            Self::Accessible => ("Accessible", "$15-18", 3, 8),
            Self::Premium => ("Premium", "$35-45", 4, 12),
        };

        VehicleType {
            kind: *self,
            name,
            price_range,
            capacity,
            eta_minutes,
        }
    }
}

pub fn catalogue() -> Vec<VehicleType> {
    VehicleKind::ALL.iter().map(|kind| kind.details()).collect()
}

#[test]
fn catalogue_lists_every_kind_in_order() {
    let names: Vec<&str> = catalogue().iter().map(|v| v.name).collect();

    assert_eq!(names, vec!["Sedan", "SUV", "Maxi", "Accessible", "Premium"]);
}

#[test]
fn default_vehicle_is_sedan() {
    assert_eq!(VehicleKind::default(), VehicleKind::Sedan);
    assert_eq!(VehicleKind::default().details().price_range, "$12-15");
}

#[test]
fn kinds_use_snake_case_on_the_wire() {
    let kind: VehicleKind = serde_json::from_str("\"accessible\"").unwrap();
    assert_eq!(kind, VehicleKind::Accessible);

    assert_eq!(serde_json::to_string(&VehicleKind::Suv).unwrap(), "\"suv\"");
}
