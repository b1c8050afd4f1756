use crate::cache::{CacheStats, ItineraryCache};
use crate::error::{AppError, Result};
use crate::models::Itinerary;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Redis-backed itinerary cache. `ConnectionManager` clones share one
/// multiplexed connection.
pub struct RedisCacheService {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCacheService {
    pub async fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Cache(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(RedisCacheService {
            connection,
            ttl_seconds,
        })
    }
}

#[async_trait]
impl ItineraryCache for RedisCacheService {
    async fn get_itinerary(&self, key: &str) -> Option<Itinerary> {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<Option<String>> = conn.get(key).await;

        match result {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(itinerary) => {
                    tracing::debug!("Cache hit for itinerary: {}", key);
                    Some(itinerary)
                }
                Err(e) => {
                    tracing::warn!("Failed to deserialize cached itinerary: {}", e);
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("Cache miss for itinerary: {}", key);
                None
            }
            Err(e) => {
                tracing::warn!("Redis error getting itinerary: {}", e);
                None
            }
        }
    }

    async fn cache_itinerary(&self, key: &str, itinerary: &Itinerary) {
        let json = match serde_json::to_string(itinerary) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize itinerary for cache: {}", e);
                return;
            }
        };

        let mut conn = self.connection.clone();
        let result: redis::RedisResult<()> = conn.set_ex(key, json, self.ttl_seconds).await;

        match result {
            Ok(()) => tracing::debug!("Cached itinerary with TTL {}s: {}", self.ttl_seconds, key),
            Err(e) => tracing::warn!("Failed to cache itinerary: {}", e),
        }
    }

    async fn get_stats(&self) -> CacheStats {
        let mut conn = self.connection.clone();
        let info: redis::RedisResult<String> =
            redis::cmd("INFO").arg("stats").query_async(&mut conn).await;

        match info {
            Ok(info_str) => CacheStats::from_counts(
                parse_info_value(&info_str, "keyspace_hits"),
                parse_info_value(&info_str, "keyspace_misses"),
                true,
            ),
            Err(_) => CacheStats::from_counts(0, 0, false),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        let result: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Read a numeric field from `INFO` output ("key:value" lines)
fn parse_info_value(info: &str, key: &str) -> u64 {
    info.lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix(':'))
        .and_then(|val| val.trim().parse().ok())
        .unwrap_or(0)
}
