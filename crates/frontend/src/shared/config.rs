use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub basket: BasketConfig,
    pub auth: AuthConfig,
    pub board: BoardConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BasketConfig {
    pub storage_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub access_token_key: String,
    pub refresh_token_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub click_threshold_ms: u64,
    pub page_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub page_limit: u32,
}

/// Configuration embedded in the bundle
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

static CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

/// Load configuration.
///
/// Search order:
/// 1. `config.toml` embedded at build time
/// 2. Built-in defaults if the embedded file does not parse
fn load_config() -> AppConfig {
    match toml::from_str::<AppConfig>(DEFAULT_CONFIG) {
        Ok(config) => {
            log::debug!("Loaded embedded config, api base: '{}'", config.api.base_url);
            config
        }
        Err(e) => {
            log::error!("Embedded config.toml is invalid, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
            },
            basket: BasketConfig {
                storage_key: "flowers-store-basket".to_string(),
            },
            auth: AuthConfig {
                access_token_key: "auth_access_token".to_string(),
                refresh_token_key: "auth_refresh_token".to_string(),
            },
            board: BoardConfig {
                click_threshold_ms: 200,
                page_limit: 100,
            },
            catalog: CatalogConfig { page_limit: 20 },
        }
    }
}

/// Application-wide configuration
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.basket.storage_key, "flowers-store-basket");
        assert_eq!(config.board.click_threshold_ms, 200);
        assert_eq!(config.board.page_limit, 100);
    }

    #[test]
    fn test_empty_base_url_allowed() {
        let raw = DEFAULT_CONFIG.replace("https://api.lascovo.ru", "");
        let config: AppConfig = toml::from_str(&raw).unwrap();
        assert!(config.api.base_url.is_empty());
    }
}
