use crate::constants::*;
use crate::models::DistanceKm;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: Option<String>, // Falls back to the in-memory cache when unset
    pub llm: LlmConfig,
    pub geocoder_base_url: String,
    pub http_timeout_secs: u64,
    pub jwt_secret: String,
    pub itinerary_cache_ttl: u64,
    pub chat_session_ttl: u64,
    pub food_spot_radius: DistanceKm,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Root of an OpenAI-compatible API, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, String> {
        let temperature: f32 = env::var("LLM_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_LLM_TEMPERATURE.to_string())
            .parse()
            .map_err(|_| "Invalid LLM_TEMPERATURE")?;

        if !(0.0..=2.0).contains(&temperature) {
            return Err("LLM_TEMPERATURE must be between 0 and 2".to_string());
        }

        Ok(LlmConfig {
            api_key: env::var("LLM_API_KEY").map_err(|_| "LLM_API_KEY must be set")?,
            base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            temperature,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        // Parse and validate the food-spot radius
        let food_spot_radius_km: f64 = env::var("FOOD_SPOT_RADIUS_KM")
            .unwrap_or_else(|_| DEFAULT_FOOD_SPOT_RADIUS_KM.to_string())
            .parse()
            .map_err(|_| "Invalid FOOD_SPOT_RADIUS_KM")?;

        if food_spot_radius_km <= 0.0 || food_spot_radius_km > 10.0 {
            return Err("FOOD_SPOT_RADIUS_KM must be between 0 and 10 kilometers".to_string());
        }

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set")?;
        if jwt_secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL").ok(),
            llm: LlmConfig::from_env()?,
            geocoder_base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid HTTP_TIMEOUT_SECS")?,
            jwt_secret,
            itinerary_cache_ttl: env::var("ITINERARY_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_ITINERARY_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid ITINERARY_CACHE_TTL")?,
            chat_session_ttl: env::var("CHAT_SESSION_TTL")
                .unwrap_or_else(|_| DEFAULT_CHAT_SESSION_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid CHAT_SESSION_TTL")?,
            food_spot_radius: DistanceKm::new(food_spot_radius_km)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_sqlite(&self) -> bool {
        self.database_url.starts_with("sqlite:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "DATABASE_URL",
        "LLM_API_KEY",
        "JWT_SECRET",
        "PORT",
        "FOOD_SPOT_RADIUS_KM",
        "LLM_TEMPERATURE",
        "LLM_BASE_URL",
        "REDIS_URL",
    ];

    fn reset_env() {
        for var in VARS {
            env::remove_var(var);
        }
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("LLM_API_KEY", "sk-test");
        env::set_var("JWT_SECRET", "0123456789abcdef0123");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        reset_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.food_spot_radius.as_km(), 0.5);
        assert!(config.redis_url.is_none());
        assert!(config.uses_sqlite());
        assert_eq!(config.server_address(), "0.0.0.0:3000");
    }

    #[test]
    #[serial]
    fn test_missing_required_vars() {
        reset_env();
        env::remove_var("LLM_API_KEY");
        assert_eq!(Config::from_env().unwrap_err(), "LLM_API_KEY must be set");

        reset_env();
        env::set_var("JWT_SECRET", "short");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_values() {
        reset_env();
        env::set_var("FOOD_SPOT_RADIUS_KM", "-1");
        assert!(Config::from_env().is_err());

        reset_env();
        env::set_var("LLM_TEMPERATURE", "3.5");
        assert!(Config::from_env().is_err());

        reset_env();
        env::set_var("PORT", "not-a-port");
        assert_eq!(Config::from_env().unwrap_err(), "Invalid PORT");
    }

    #[test]
    #[serial]
    fn test_base_url_trailing_slash_is_trimmed() {
        reset_env();
        env::set_var("LLM_BASE_URL", "http://localhost:8080/v1/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
    }
}
