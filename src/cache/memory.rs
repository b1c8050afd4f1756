use crate::cache::{CacheStats, ItineraryCache};
use crate::models::Itinerary;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory itinerary cache backed by moka with TTL and bounded capacity.
pub struct MemoryCacheService {
    itineraries: Cache<String, Arc<Itinerary>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCacheService {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let itineraries = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryCacheService {
            itineraries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl ItineraryCache for MemoryCacheService {
    async fn get_itinerary(&self, key: &str) -> Option<Itinerary> {
        match self.itineraries.get(key).await {
            Some(itinerary) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache hit for itinerary: {}", key);
                Some((*itinerary).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache miss for itinerary: {}", key);
                None
            }
        }
    }

    async fn cache_itinerary(&self, key: &str, itinerary: &Itinerary) {
        self.itineraries
            .insert(key.to_string(), Arc::new(itinerary.clone()))
            .await;
        tracing::debug!(
            places = itinerary.places.len(),
            "Memory cached itinerary: {}",
            key
        );
    }

    async fn get_stats(&self) -> CacheStats {
        CacheStats::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            true,
        )
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Place, PlaceCategory, TransportMode};

    fn make_itinerary(title: &str) -> Itinerary {
        let location = Coordinates::new(48.8584, 2.2945).unwrap();
        Itinerary {
            title: title.to_string(),
            places: vec![Place {
                id: "eiffel".to_string(),
                name: "Eiffel Tower".to_string(),
                description: "Iron lattice tower".to_string(),
                location,
                duration: 90,
                category: PlaceCategory::Landmark,
                historical_facts: vec![],
                best_time_to_visit: None,
                highlights: vec![],
            }],
            transport_times: vec![],
            total_duration: 90,
            transport_mode: TransportMode::Walking,
            notes: String::new(),
            route: vec![location],
            food_recommendations: vec![],
            hotels: vec![],
            tips: vec![],
            meal_slots: vec![],
        }
    }

    #[tokio::test]
    async fn cache_miss() {
        let cache = MemoryCacheService::new(3600, 100);
        assert!(cache.get_itinerary("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn stored_itinerary_is_returned() {
        let cache = MemoryCacheService::new(3600, 100);
        cache.cache_itinerary("key1", &make_itinerary("Paris")).await;

        let cached = cache.get_itinerary("key1").await.unwrap();
        assert_eq!(cached.title, "Paris");
        assert_eq!(cached.route.len(), 1);
    }

    #[tokio::test]
    async fn stats_tracking() {
        let cache = MemoryCacheService::new(3600, 100);
        cache.cache_itinerary("key1", &make_itinerary("Paris")).await;

        cache.get_itinerary("missing").await;
        cache.get_itinerary("key1").await;
        cache.get_itinerary("key1").await;

        let stats = cache.get_stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 66.666).abs() < 1.0);
        assert!(cache.health_check().await);
        assert_eq!(cache.backend_name(), "memory");
    }

    #[tokio::test]
    async fn ttl_expiry() {
        let cache = MemoryCacheService::new(1, 100);
        cache.cache_itinerary("key1", &make_itinerary("Paris")).await;
        assert!(cache.get_itinerary("key1").await.is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(cache.get_itinerary("key1").await.is_none());
    }
}
