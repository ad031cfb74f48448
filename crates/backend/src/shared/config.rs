use contracts::domain::a025_wc_connection::WcConnection;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub woocommerce: WooCommerceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Подключение к WooCommerce. Пустые значения берутся из переменных окружения.
#[derive(Deserialize, Clone, Default)]
pub struct WooCommerceConfig {
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    /// Таймаут HTTP-запроса к Reports API; не задан = без ограничения
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl WooCommerceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("site_url", &self.site_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[woocommerce]
site_url = ""
consumer_key = ""
consumer_secret = ""
"#;

pub const ENV_SITE_URL: &str = "WP_SITE_URL";
pub const ENV_CONSUMER_KEY: &str = "WC_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "WC_CONSUMER_SECRET";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Собрать подключение к WooCommerce: значения из конфига,
/// для пустых берутся WP_SITE_URL, WC_CONSUMER_KEY, WC_CONSUMER_SECRET
pub fn resolve_connection(config: &WooCommerceConfig) -> anyhow::Result<WcConnection> {
    resolve_connection_with(config, |name| std::env::var(name).ok())
}

pub fn resolve_connection_with<F>(config: &WooCommerceConfig, env: F) -> anyhow::Result<WcConnection>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |value: &str, env_name: &str| -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            env(env_name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        } else {
            Some(value.to_string())
        }
    };

    let site_url = pick(&config.site_url, ENV_SITE_URL);
    let consumer_key = pick(&config.consumer_key, ENV_CONSUMER_KEY);
    let consumer_secret = pick(&config.consumer_secret, ENV_CONSUMER_SECRET);

    match (site_url, consumer_key, consumer_secret) {
        (Some(site_url), Some(consumer_key), Some(consumer_secret)) => {
            Ok(WcConnection::new(site_url, consumer_key, consumer_secret))
        }
        (site_url, consumer_key, consumer_secret) => {
            let missing: Vec<&str> = [
                (site_url.is_none(), "site_url / WP_SITE_URL"),
                (consumer_key.is_none(), "consumer_key / WC_CONSUMER_KEY"),
                (consumer_secret.is_none(), "consumer_secret / WC_CONSUMER_SECRET"),
            ]
            .into_iter()
            .filter(|(is_missing, _)| *is_missing)
            .map(|(_, name)| name)
            .collect();
            anyhow::bail!(
                "Missing WooCommerce credentials: {}. Set them in [woocommerce] of config.toml or via environment variables.",
                missing.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.woocommerce.site_url, "");
        assert!(config.woocommerce.request_timeout().is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[woocommerce]
site_url = "https://shop.example.com"
request_timeout_secs = 30
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.woocommerce.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_resolve_connection_prefers_config_then_env() {
        let config = WooCommerceConfig {
            site_url: "https://shop.example.com".into(),
            consumer_key: String::new(),
            consumer_secret: "cs_config".into(),
            request_timeout_secs: None,
        };
        let env: HashMap<&str, &str> = [
            (ENV_SITE_URL, "https://env.example.com"),
            (ENV_CONSUMER_KEY, "ck_env"),
            (ENV_CONSUMER_SECRET, "cs_env"),
        ]
        .into_iter()
        .collect();

        let conn = resolve_connection_with(&config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(conn.site_url, "https://shop.example.com");
        assert_eq!(conn.consumer_key, "ck_env");
        assert_eq!(conn.consumer_secret, "cs_config");
    }

    #[test]
    fn test_resolve_connection_lists_missing_settings() {
        let err = resolve_connection_with(&WooCommerceConfig::default(), |k| {
            (k == ENV_SITE_URL).then(|| "https://env.example.com".to_string())
        })
        .unwrap_err()
        .to_string();

        assert!(err.contains("WC_CONSUMER_KEY"));
        assert!(err.contains("WC_CONSUMER_SECRET"));
        assert!(!err.contains("WP_SITE_URL"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = WooCommerceConfig {
            consumer_secret: "cs_top_secret".into(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("cs_top_secret"));
    }
}
