mod memory;
mod redis;

pub use memory::MemoryCacheService;
pub use self::redis::RedisCacheService;

use crate::models::{Itinerary, UserPreferences};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Storage for generated itineraries. Misses and backend failures both
/// surface as `None`; caching is best-effort.
#[async_trait]
pub trait ItineraryCache: Send + Sync {
    async fn get_itinerary(&self, key: &str) -> Option<Itinerary>;
    async fn cache_itinerary(&self, key: &str, itinerary: &Itinerary);
    async fn get_stats(&self) -> CacheStats;
    async fn health_check(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub connected: bool,
}

impl CacheStats {
    pub fn from_counts(hits: u64, misses: u64, connected: bool) -> Self {
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            connected,
        }
    }
}

/// Hash-friendly, normalised view of the preferences that shape a prompt
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
struct PreferencesHash {
    location: String,
    // Rounded to 3 decimal places (~100m)
    coordinates: Option<(i64, i64)>,
    duration_minutes: u32,
    transport_mode: String,
    interests: Vec<String>,
    budget: String,
    pace: String,
    notes: Option<String>,
}

impl PreferencesHash {
    fn new(prefs: &UserPreferences) -> Self {
        let mut interests: Vec<String> = prefs
            .interests
            .iter()
            .map(|i| i.trim().to_lowercase())
            .collect();
        interests.sort(); // Ensure consistent ordering
        interests.dedup();

        PreferencesHash {
            location: prefs.location.trim().to_lowercase(),
            coordinates: prefs.coordinates.map(|c| {
                (
                    (c.lat * 1000.0).round() as i64,
                    (c.lng * 1000.0).round() as i64,
                )
            }),
            duration_minutes: prefs.duration_minutes(),
            transport_mode: prefs.transport_mode.to_string(),
            interests,
            budget: prefs.budget.to_string(),
            pace: prefs.pace.to_string(),
            notes: prefs
                .additional_notes
                .as_deref()
                .map(|n| n.trim().to_lowercase())
                .filter(|n| !n.is_empty()),
        }
    }
}

/// Cache key for an itinerary request.
/// Case, whitespace and interest order do not affect the key.
pub fn itinerary_cache_key(prefs: &UserPreferences) -> String {
    let mut hasher = DefaultHasher::new();
    PreferencesHash::new(prefs).hash(&mut hasher);
    format!("itinerary:{:x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, TransportMode};

    fn prefs(location: &str, interests: &[&str]) -> UserPreferences {
        UserPreferences::new(
            location,
            3.0,
            interests.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_cache_key_consistency() {
        let a = prefs("Paris", &["history", "art"]);
        assert_eq!(itinerary_cache_key(&a), itinerary_cache_key(&a.clone()));
        assert!(itinerary_cache_key(&a).starts_with("itinerary:"));
    }

    #[test]
    fn test_cache_key_normalisation() {
        let a = prefs("Paris", &["history", "art"]);
        let b = prefs("  paris ", &["Art", "history"]);
        assert_eq!(itinerary_cache_key(&a), itinerary_cache_key(&b));
    }

    #[test]
    fn test_cache_key_distinguishes_preferences() {
        let base = prefs("Paris", &["history"]);

        let mut driving = base.clone();
        driving.transport_mode = TransportMode::Driving;
        assert_ne!(itinerary_cache_key(&base), itinerary_cache_key(&driving));

        let mut longer = base.clone();
        longer.duration = 4.0;
        assert_ne!(itinerary_cache_key(&base), itinerary_cache_key(&longer));

        assert_ne!(
            itinerary_cache_key(&base),
            itinerary_cache_key(&prefs("Lyon", &["history"]))
        );
    }

    #[test]
    fn test_cache_key_coordinate_precision() {
        let mut a = prefs("Paris", &[]);
        let mut b = a.clone();
        a.coordinates = Some(Coordinates::new(48.8566, 2.3522).unwrap());
        b.coordinates = Some(Coordinates::new(48.8567, 2.3523).unwrap());
        assert_eq!(itinerary_cache_key(&a), itinerary_cache_key(&b));
    }

    #[test]
    fn test_stats_hit_rate() {
        let stats = CacheStats::from_counts(3, 1, true);
        assert_eq!(stats.hit_rate, 75.0);
        assert_eq!(CacheStats::from_counts(0, 0, false).hit_rate, 0.0);
    }
}
