use crate::constants::{DEFAULT_MAP_ZOOM, FOCUSED_MAP_ZOOM};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Itinerary, MealKind, Place, TransportMode};
use crate::services::geometry::directions_url;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// What the client wants drawn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewRequest {
    pub itinerary: Itinerary,
    /// Explicit centre, usually the coordinate the user planned from
    #[serde(default)]
    pub center: Option<Coordinates>,
    #[serde(default)]
    pub focus_place_id: Option<String>,
    #[serde(default = "default_show_route")]
    pub show_route: bool,
}

fn default_show_route() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
    /// 1-based visiting order
    pub order: usize,
    pub duration: u32,
    pub directions_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<MealKind>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyline: Option<Vec<Coordinates>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_place_id: Option<String>,
    pub geojson: FeatureCollection,
}

/// Lay out an itinerary for the map.
///
/// The centre is the focused place if any, else the explicit centre, else
/// the mean of the stop coordinates.
pub fn build_map_view(request: &MapViewRequest) -> Result<MapView> {
    let itinerary = &request.itinerary;

    let focused = match request.focus_place_id.as_deref() {
        Some(id) => Some(itinerary.place(id).ok_or_else(|| {
            AppError::InvalidRequest(format!("focus place '{}' is not part of the tour", id))
        })?),
        None => None,
    };

    let centroid = Coordinates::centroid(&itinerary.route)
        .or_else(|| Coordinates::centroid(&place_locations(&itinerary.places)));

    let center = focused
        .map(|p| p.location)
        .or(request.center)
        .or(centroid)
        .ok_or_else(|| AppError::InvalidRequest("tour has no places to show".to_string()))?;

    let markers = itinerary
        .places
        .iter()
        .enumerate()
        .map(|(i, place)| MapMarker {
            id: place.id.clone(),
            name: place.name.clone(),
            location: place.location,
            order: i + 1,
            duration: place.duration,
            directions_url: directions_url(&place.location, &place.name, itinerary.transport_mode),
            meal: itinerary
                .meal_slots
                .iter()
                .find(|s| s.place_index == i)
                .map(|s| s.meal),
        })
        .collect();

    let polyline = request
        .show_route
        .then(|| itinerary.route.clone())
        .filter(|r| r.len() >= 2);

    Ok(MapView {
        center,
        zoom: if focused.is_some() {
            FOCUSED_MAP_ZOOM
        } else {
            DEFAULT_MAP_ZOOM
        },
        markers,
        polyline,
        focus_place_id: focused.map(|p| p.id.clone()),
        geojson: to_feature_collection(&itinerary.places, &itinerary.route, itinerary.transport_mode),
    })
}

fn place_locations(places: &[Place]) -> Vec<Coordinates> {
    places.iter().map(|p| p.location).collect()
}

/// GeoJSON positions are `[lng, lat]`
fn position(c: &Coordinates) -> Vec<f64> {
    vec![c.lng, c.lat]
}

fn properties(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

/// One Point feature per place, plus a LineString for a route with at
/// least two points.
pub fn to_feature_collection(
    places: &[Place],
    route: &[Coordinates],
    mode: TransportMode,
) -> FeatureCollection {
    let mut features: Vec<Feature> = places
        .iter()
        .enumerate()
        .map(|(i, place)| Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(position(&place.location)))),
            id: Some(geojson::feature::Id::String(place.id.clone())),
            properties: properties(json!({
                "name": place.name,
                "type": place.category.as_str(),
                "order": i + 1,
                "duration": place.duration,
            })),
            foreign_members: None,
        })
        .collect();

    if route.len() >= 2 {
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(
                route.iter().map(position).collect(),
            ))),
            id: Some(geojson::feature::Id::String("route".to_string())),
            properties: properties(json!({ "transportMode": mode.to_string() })),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealSlot, PlaceCategory};

    fn place(id: &str, lat: f64, lng: f64) -> Place {
        Place {
            id: id.to_string(),
            name: format!("{} name", id),
            description: String::new(),
            location: Coordinates::new(lat, lng).unwrap(),
            duration: 45,
            category: PlaceCategory::Museum,
            historical_facts: vec![],
            best_time_to_visit: None,
            highlights: vec![],
        }
    }

    fn itinerary(places: Vec<Place>) -> Itinerary {
        let route = places.iter().map(|p| p.location).collect();
        let transport_times = vec![10; places.len().saturating_sub(1)];
        Itinerary {
            title: "Test".to_string(),
            places,
            transport_times,
            total_duration: 120,
            transport_mode: TransportMode::Walking,
            notes: String::new(),
            route,
            food_recommendations: vec![],
            hotels: vec![],
            tips: vec![],
            meal_slots: vec![],
        }
    }

    fn request(itinerary: Itinerary) -> MapViewRequest {
        MapViewRequest {
            itinerary,
            center: None,
            focus_place_id: None,
            show_route: true,
        }
    }

    #[test]
    fn test_center_defaults_to_centroid() {
        let view = build_map_view(&request(itinerary(vec![
            place("a", 10.0, 20.0),
            place("b", 12.0, 22.0),
        ])))
        .unwrap();

        assert_eq!(view.center, Coordinates::new(11.0, 21.0).unwrap());
        assert_eq!(view.zoom, DEFAULT_MAP_ZOOM);
        assert_eq!(view.markers[1].order, 2);
        assert_eq!(view.polyline.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_center_wins_over_centroid() {
        let mut req = request(itinerary(vec![place("a", 10.0, 20.0)]));
        req.center = Some(Coordinates::new(1.0, 2.0).unwrap());

        let view = build_map_view(&req).unwrap();
        assert_eq!(view.center, Coordinates::new(1.0, 2.0).unwrap());
        // A single stop draws no line
        assert!(view.polyline.is_none());
    }

    #[test]
    fn test_focus_recenters_on_place() {
        let mut req = request(itinerary(vec![place("a", 10.0, 20.0), place("b", 12.0, 22.0)]));
        req.focus_place_id = Some("b".to_string());

        let view = build_map_view(&req).unwrap();
        assert_eq!(view.center, Coordinates::new(12.0, 22.0).unwrap());
        assert_eq!(view.zoom, FOCUSED_MAP_ZOOM);
        assert_eq!(view.focus_place_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_unknown_focus_is_rejected() {
        let mut req = request(itinerary(vec![place("a", 10.0, 20.0)]));
        req.focus_place_id = Some("zzz".to_string());
        assert!(matches!(build_map_view(&req), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_meal_markers() {
        let mut it = itinerary(vec![place("a", 10.0, 20.0), place("b", 12.0, 22.0)]);
        it.meal_slots.push(MealSlot {
            meal: MealKind::Lunch,
            place_id: "b".to_string(),
            place_index: 1,
            starts_at_minute: 750,
        });

        let view = build_map_view(&request(it)).unwrap();
        assert_eq!(view.markers[0].meal, None);
        assert_eq!(view.markers[1].meal, Some(MealKind::Lunch));
    }

    #[test]
    fn test_geojson_export() {
        let places = vec![place("a", 48.85, 2.35), place("b", 48.86, 2.33)];
        let route: Vec<Coordinates> = places.iter().map(|p| p.location).collect();

        let collection = to_feature_collection(&places, &route, TransportMode::Walking);
        assert_eq!(collection.features.len(), 3);

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        // lng first
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0], 2.35);
        assert_eq!(json["features"][2]["geometry"]["type"], "LineString");

        let single = to_feature_collection(&places[..1], &route[..1], TransportMode::Walking);
        assert_eq!(single.features.len(), 1);
    }
}
