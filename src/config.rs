use std::env;

use crate::external::{DEFAULT_API_BASE, DEFAULT_TOKEN_DIRECTORY_URL};

pub const DEFAULT_LOG_FILTER: &str = "info,volume_leaderboard=debug";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub token_directory_url: String,
    pub api_base_url: String,
    pub preferences_path: String,
    pub cors_url: Option<String>,
    pub random_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            token_directory_url: DEFAULT_TOKEN_DIRECTORY_URL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            preferences_path: "preferences.json".to_string(),
            cors_url: None,
            random_seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Reads the environment (after `.env` has been loaded). Unset or
    /// unparsable values fall back to the defaults.
    pub fn init() -> Config {
        let defaults = Config::default();
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            token_directory_url: env::var("TOKEN_DIRECTORY_URL")
                .unwrap_or(defaults.token_directory_url),
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            preferences_path: env::var("PREFERENCES_PATH").unwrap_or(defaults.preferences_path),
            cors_url: env::var("CORS_URL").ok().filter(|url| !url.is_empty()),
            random_seed: env::var("RANDOM_SEED").ok().and_then(|s| s.parse().ok()),
            log_filter: env::var("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert!(config.token_directory_url.ends_with("chiliz/index.json"));
        assert_eq!(config.port, 8080);
        assert!(config.random_seed.is_none());
    }
}
