use crate::models::{Coordinates, DistanceKm, FoodSpot, Place, TransportMode};

const GOOGLE_MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// The route is the ordered list of stop coordinates. No road geometry is
/// fetched.
pub fn derive_route(places: &[Place]) -> Vec<Coordinates> {
    places.iter().map(|p| p.location).collect()
}

/// Keep the food spots within `radius` of any route stop, annotate each with
/// its distance to the nearest stop and sort nearest first.
///
/// Ties keep their input order. An empty route accepts nothing.
pub fn filter_food_spots_near_route(
    spots: Vec<FoodSpot>,
    route: &[Coordinates],
    radius: DistanceKm,
) -> Vec<FoodSpot> {
    let mut accepted: Vec<FoodSpot> = spots
        .into_iter()
        .filter_map(|mut spot| {
            let distance = spot.location.min_distance_to(route)?;
            if !radius.contains(distance) {
                return None;
            }
            spot.distance = Some(distance);
            Some(spot)
        })
        .collect();

    // sort_by is stable
    accepted.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    accepted
}

/// Google Maps directions link from the user's current location.
pub fn directions_url(
    destination: &Coordinates,
    destination_name: &str,
    mode: TransportMode,
) -> String {
    format!(
        "{}?api=1&origin=current+location&destination={},{}&destination_name={}&travelmode={}",
        GOOGLE_MAPS_DIRECTIONS_URL,
        destination.lat,
        destination.lng,
        urlencoding::encode(destination_name),
        mode.directions_mode()
    )
}
