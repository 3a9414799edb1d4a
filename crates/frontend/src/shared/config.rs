use serde::Deserialize;

/// localStorage key holding an optional TOML override
pub const CONFIG_STORAGE_KEY: &str = "device_console.config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty means same origin as the page
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Debug)
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""

[logging]
level = "debug"
"#;

fn default_config() -> AppConfig {
    match toml::from_str(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(_) => AppConfig {
            api: ApiConfig {
                base_url: String::new(),
            },
            logging: LoggingConfig::default(),
        },
    }
}

/// Parse an override document, falling back to the embedded default
pub fn parse_config(override_toml: Option<&str>) -> AppConfig {
    let Some(contents) = override_toml else {
        return default_config();
    };
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring invalid {} override: {}", CONFIG_STORAGE_KEY, e);
            default_config()
        }
    }
}

fn stored_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(CONFIG_STORAGE_KEY)
        .ok()?
}

/// Load configuration
///
/// Search order:
/// 1. TOML document in localStorage under `device_console.config`
/// 2. Embedded default config
pub fn load_config() -> AppConfig {
    parse_config(stored_override().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.logging.level(), log::Level::Debug);
    }

    #[test]
    fn test_override_replaces_base_url() {
        let config = parse_config(Some(
            "[api]\nbase_url = \"http://10.0.0.5:8000\"\n[logging]\nlevel = \"warn\"\n",
        ));
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.logging.level(), log::Level::Warn);
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let config = parse_config(Some("api = 3"));
        assert_eq!(config, default_config());
    }
}
