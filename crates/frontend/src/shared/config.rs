use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute backend origin. When absent the page's own host is used with `port`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

fn default_port() -> u16 {
    3000
}

fn default_max_visible() -> usize {
    5
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[list]
default_page_size = 10
page_size_options = [10, 25, 50, 100]
search_debounce_ms = 300

[notifications]
timeout_ms = 4000
max_visible = 5
"#;

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;
        if config.list.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "list.default_page_size must be positive".to_string(),
            ));
        }
        config.list.page_size_options.retain(|size| *size > 0);
        if !config
            .list
            .page_size_options
            .contains(&config.list.default_page_size)
        {
            config
                .list
                .page_size_options
                .push(config.list.default_page_size);
        }
        config.list.page_size_options.sort_unstable();
        config.list.page_size_options.dedup();
        Ok(config)
    }

    /// Backend origin for the given page location (`"https:"`, `"example.com"`).
    pub fn api_base(&self, protocol: &str, hostname: &str) -> String {
        match self.api.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("{}//{}:{}", protocol, hostname, self.api.port),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: None,
                port: default_port(),
            },
            list: ListConfig {
                default_page_size: 10,
                page_size_options: vec![10, 25, 50, 100],
                search_debounce_ms: 300,
            },
            notifications: NotificationConfig {
                timeout_ms: 4000,
                max_visible: default_max_visible(),
            },
        }
    }
}

/// Load configuration
///
/// Search order:
/// 1. `<meta name="app-config" content="...toml...">` in the host page
/// 2. Falls back to embedded default config
fn load_config() -> AppConfig {
    let override_toml = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector("meta[name='app-config']").ok().flatten())
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|content| !content.trim().is_empty());

    if let Some(contents) = override_toml {
        match AppConfig::from_toml(&contents) {
            Ok(config) => {
                log::debug!("Loaded config from app-config meta tag");
                return config;
            }
            Err(e) => log::warn!("Ignoring app-config meta tag: {}", e),
        }
    }

    AppConfig::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::warn!("Embedded config rejected ({}), using built-in defaults", e);
        AppConfig::default()
    })
}

static CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn page_size_options_always_contain_default() {
        let config = AppConfig::from_toml(
            r#"
[api]
base_url = "https://api.example.com/"

[list]
default_page_size = 20
page_size_options = [50, 0, 10, 50]
search_debounce_ms = 250

[notifications]
timeout_ms = 1000
"#,
        )
        .unwrap();
        assert_eq!(config.list.page_size_options, vec![10, 20, 50]);
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.notifications.max_visible, 5);
        assert_eq!(config.api_base("http:", "localhost"), "https://api.example.com");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = AppConfig::from_toml(
            "[api]\n[list]\ndefault_page_size = 0\npage_size_options = []\nsearch_debounce_ms = 0\n[notifications]\ntimeout_ms = 1\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn api_base_from_location() {
        let config = AppConfig::default();
        assert_eq!(config.api_base("https:", "ops.local"), "https://ops.local:3000");
    }
}
