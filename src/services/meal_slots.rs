use crate::constants::{
    DINNER_MIN_TOUR_MINUTES, DINNER_WINDOW_END_MINUTE, DINNER_WINDOW_START_MINUTE,
    LUNCH_WINDOW_END_MINUTE, LUNCH_WINDOW_START_MINUTE, TOUR_START_MINUTE,
};
use crate::models::{MealKind, MealSlot, Place};

/// Clock minute at which the visit of each place ends, assuming the tour
/// starts at 09:00 and travel to a place precedes its visit.
///
/// A missing transport time counts as zero. Sums saturate at `u32::MAX`.
pub fn visit_end_times(places: &[Place], transport_times: &[u32]) -> Vec<u32> {
    let mut elapsed = TOUR_START_MINUTE;
    places
        .iter()
        .enumerate()
        .map(|(i, place)| {
            if i > 0 {
                elapsed = elapsed
                    .saturating_add(transport_times.get(i - 1).copied().unwrap_or(0));
            }
            elapsed = elapsed.saturating_add(place.duration);
            elapsed
        })
        .collect()
}

/// Suggest a lunch break and, for long tours, a dinner break.
///
/// Lunch follows the first place finishing inside 12:00-14:00. Dinner is
/// only considered when `total_duration` exceeds eight hours and follows the
/// last place finishing inside 18:00-20:00.
pub fn estimate_meal_slots(
    places: &[Place],
    transport_times: &[u32],
    total_duration: u32,
) -> Vec<MealSlot> {
    let ends = visit_end_times(places, transport_times);
    let mut slots = Vec::new();

    let lunch = LUNCH_WINDOW_START_MINUTE..LUNCH_WINDOW_END_MINUTE;
    if let Some(index) = ends.iter().position(|end| lunch.contains(end)) {
        slots.push(slot(MealKind::Lunch, places, &ends, index));
    }

    if total_duration > DINNER_MIN_TOUR_MINUTES {
        let dinner = DINNER_WINDOW_START_MINUTE..DINNER_WINDOW_END_MINUTE;
        if let Some(index) = ends.iter().rposition(|end| dinner.contains(end)) {
            slots.push(slot(MealKind::Dinner, places, &ends, index));
        }
    }

    slots
}

fn slot(meal: MealKind, places: &[Place], ends: &[u32], index: usize) -> MealSlot {
    MealSlot {
        meal,
        place_id: places[index].id.clone(),
        place_index: index,
        starts_at_minute: ends[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, PlaceCategory};

    fn places(durations: &[u32]) -> Vec<Place> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &duration)| Place {
                id: format!("p{}", i + 1),
                name: format!("Place {}", i + 1),
                description: String::new(),
                location: Coordinates::new(48.85, 2.35).unwrap(),
                duration,
                category: PlaceCategory::Landmark,
                historical_facts: vec![],
                best_time_to_visit: None,
                highlights: vec![],
            })
            .collect()
    }

    #[test]
    fn test_visit_end_times_accumulate_travel() {
        let ends = visit_end_times(&places(&[60, 30]), &[15]);
        assert_eq!(ends, vec![600, 645]);
    }

    #[test]
    fn test_lunch_lands_on_place_crossing_noon() {
        // Ends: 10:30, 11:45, 13:00
        let ps = places(&[90, 60, 60]);
        let slots = estimate_meal_slots(&ps, &[15, 15], 240);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].meal, MealKind::Lunch);
        assert_eq!(slots[0].place_id, "p3");
        assert_eq!(slots[0].place_index, 2);
        assert_eq!(slots[0].clock_time(), "13:00");
    }

    #[test]
    fn test_lunch_window_is_half_open() {
        // First place ends exactly at 14:00
        let slots = estimate_meal_slots(&places(&[300]), &[], 300);
        assert!(slots.is_empty());

        // Ends exactly at 12:00
        let slots = estimate_meal_slots(&places(&[180]), &[], 180);
        assert_eq!(slots[0].clock_time(), "12:00");
    }

    #[test]
    fn test_dinner_only_for_long_tours() {
        // Ends: 12:30, 15:30, 18:30, 19:30
        let ps = places(&[210, 170, 170, 50]);
        let transport = [10, 10, 10];

        let short = estimate_meal_slots(&ps, &transport, 480);
        assert!(short.iter().all(|s| s.meal != MealKind::Dinner));

        let long = estimate_meal_slots(&ps, &transport, 630);
        let dinner = long.iter().find(|s| s.meal == MealKind::Dinner).unwrap();
        assert_eq!(dinner.place_id, "p4");
        assert_eq!(dinner.clock_time(), "19:30");
    }

    #[test]
    fn test_huge_durations_saturate() {
        let ends = visit_end_times(&places(&[u32::MAX, 30]), &[u32::MAX]);
        assert_eq!(ends, vec![u32::MAX, u32::MAX]);
        assert!(estimate_meal_slots(&places(&[u32::MAX]), &[], u32::MAX).is_empty());
    }

    #[test]
    fn test_no_places_no_slots() {
        assert!(estimate_meal_slots(&[], &[], 600).is_empty());
    }
}
