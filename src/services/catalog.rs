use crate::error::{AppError, Result};
use crate::models::{Coordinates, RefillStation, Vehicle, VehicleType};
use serde::Deserialize;

pub const DEFAULT_MIN_PRICE_PER_DAY: u32 = 0;
pub const DEFAULT_MAX_PRICE_PER_DAY: u32 = 5_000;

/// Query parameters for the vehicle listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// "all" or a vehicle type
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefillStationFilter {
    #[serde(default)]
    pub search: Option<String>,
}

/// Static rental and refill-station listings for the launch city.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
    refill_stations: Vec<RefillStation>,
}

impl Catalog {
    pub fn new(vehicles: Vec<Vehicle>, refill_stations: Vec<RefillStation>) -> Self {
        Catalog {
            vehicles,
            refill_stations,
        }
    }

    pub fn jaipur() -> Self {
        Catalog::new(jaipur_vehicles(), jaipur_refill_stations())
    }

    /// Case-insensitive name match, optional type, inclusive price range.
    pub fn find_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>> {
        let wanted_type = match filter.vehicle_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) if t.eq_ignore_ascii_case("all") => None,
            Some(t) => Some(t.parse::<VehicleType>().map_err(AppError::InvalidRequest)?),
        };

        let min = filter.min_price.unwrap_or(DEFAULT_MIN_PRICE_PER_DAY);
        let max = filter.max_price.unwrap_or(DEFAULT_MAX_PRICE_PER_DAY);
        if min > max {
            return Err(AppError::InvalidRequest(format!(
                "minPrice ({}) must not exceed maxPrice ({})",
                min, max
            )));
        }

        let needle = normalise(filter.search.as_deref());

        Ok(self
            .vehicles
            .iter()
            .filter(|v| v.name.to_lowercase().contains(&needle))
            .filter(|v| wanted_type.map_or(true, |t| v.vehicle_type == t))
            .filter(|v| (min..=max).contains(&v.price_per_day))
            .cloned()
            .collect())
    }

    /// Case-insensitive match against name or description.
    pub fn find_refill_stations(&self, filter: &RefillStationFilter) -> Vec<RefillStation> {
        let needle = normalise(filter.search.as_deref());

        self.refill_stations
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

fn normalise(search: Option<&str>) -> String {
    search.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

fn vehicle(
    id: &str,
    name: &str,
    vehicle_type: VehicleType,
    price_per_day: u32,
    capacity: u32,
    transmission: &str,
    fuel_type: &str,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        vehicle_type,
        price_per_day,
        capacity,
        transmission: transmission.to_string(),
        fuel_type: fuel_type.to_string(),
        available: true,
    }
}

fn jaipur_vehicles() -> Vec<Vehicle> {
    vec![
        vehicle("1", "Toyota Innova", VehicleType::Car, 2500, 7, "Manual", "Diesel"),
        vehicle("2", "Honda City", VehicleType::Car, 1800, 5, "Automatic", "Petrol"),
        vehicle("3", "Royal Enfield Classic 350", VehicleType::Bike, 800, 2, "Manual", "Petrol"),
        vehicle("4", "Tata Ace", VehicleType::Truck, 3500, 2, "Manual", "Diesel"),
    ]
}

fn station(
    id: u32,
    name: &str,
    (lat, lng): (f64, f64),
    description: &str,
    operating_hours: &str,
    water_type: &str,
) -> RefillStation {
    RefillStation {
        id,
        name: name.to_string(),
        // Literal coordinates, always in range
        location: Coordinates { lat, lng },
        description: description.to_string(),
        operating_hours: operating_hours.to_string(),
        water_type: water_type.to_string(),
    }
}

fn jaipur_refill_stations() -> Vec<RefillStation> {
    vec![
        station(
            1,
            "Jaipur Railway Station Refill Point",
            (26.9190, 75.7887),
            "24/7 water refill station at platform 1",
            "24/7",
            "RO Purified",
        ),
        station(
            2,
            "Hawa Mahal Visitor Center",
            (26.9239, 75.8267),
            "Clean drinking water available during visiting hours",
            "9 AM - 6 PM",
            "UV Filtered",
        ),
        station(
            3,
            "City Palace Water Point",
            (26.9258, 75.8237),
            "RO purified water available for tourists",
            "8 AM - 8 PM",
            "RO + UV Purified",
        ),
        station(
            4,
            "Jantar Mantar Refill Station",
            (26.9247, 75.8242),
            "Eco-friendly water station for visitors",
            "9:30 AM - 4:30 PM",
            "RO Purified",
        ),
        station(
            5,
            "Albert Hall Museum Station",
            (26.9117, 75.8183),
            "Free water refill point near entrance",
            "10 AM - 5 PM",
            "UV + Carbon Filtered",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_returns_everything() {
        let catalog = Catalog::jaipur();
        assert_eq!(catalog.find_vehicles(&VehicleFilter::default()).unwrap().len(), 4);
        assert_eq!(
            catalog
                .find_refill_stations(&RefillStationFilter::default())
                .len(),
            5
        );
    }

    #[test]
    fn test_vehicle_type_and_search() {
        let catalog = Catalog::jaipur();

        let cars = catalog
            .find_vehicles(&VehicleFilter {
                vehicle_type: Some("car".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&cars), vec!["Toyota Innova", "Honda City"]);

        let honda = catalog
            .find_vehicles(&VehicleFilter {
                search: Some("HONDA".to_string()),
                vehicle_type: Some("all".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&honda), vec!["Honda City"]);

        assert!(catalog
            .find_vehicles(&VehicleFilter {
                vehicle_type: Some("boat".to_string()),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = Catalog::jaipur();
        let filter = VehicleFilter {
            min_price: Some(800),
            max_price: Some(1800),
            ..Default::default()
        };
        assert_eq!(
            names(&catalog.find_vehicles(&filter).unwrap()),
            vec!["Honda City", "Royal Enfield Classic 350"]
        );

        let inverted = VehicleFilter {
            min_price: Some(3000),
            max_price: Some(1000),
            ..Default::default()
        };
        assert!(catalog.find_vehicles(&inverted).is_err());
    }

    #[test]
    fn test_refill_search_matches_description() {
        let catalog = Catalog::jaipur();

        let by_description = catalog.find_refill_stations(&RefillStationFilter {
            search: Some("entrance".to_string()),
        });
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].name, "Albert Hall Museum Station");

        let by_name = catalog.find_refill_stations(&RefillStationFilter {
            search: Some("  palace ".to_string()),
        });
        assert_eq!(by_name[0].id, 3);
    }
}
