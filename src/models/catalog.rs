use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Truck,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::Car => write!(f, "car"),
            VehicleType::Bike => write!(f, "bike"),
            VehicleType::Truck => write!(f, "truck"),
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(VehicleType::Car),
            "bike" | "motorbike" => Ok(VehicleType::Bike),
            "truck" => Ok(VehicleType::Truck),
            _ => Err(format!("Invalid vehicle type: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub price_per_day: u32,
    pub capacity: u32,
    pub transmission: String,
    pub fuel_type: String,
    pub available: bool,
}

/// A free drinking-water refill point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefillStation {
    pub id: u32,
    pub name: String,
    pub location: Coordinates,
    pub description: String,
    pub operating_hours: String,
    pub water_type: String,
}
