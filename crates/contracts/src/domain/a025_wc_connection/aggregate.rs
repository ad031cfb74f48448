use serde::{Deserialize, Serialize};
use std::fmt;

/// Подключение к WooCommerce REST API (ключи consumer key / consumer secret).
///
/// Передаётся агрегатору отчётов при создании и больше не изменяется.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcConnection {
    /// Адрес сайта, например `https://shop.example.com`
    pub site_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl WcConnection {
    pub fn new(
        site_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Адрес сайта без завершающего `/`
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

// Секрет не должен попадать в логи через {:?}
impl fmt::Debug for WcConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WcConnection")
            .field("site_url", &self.site_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let conn = WcConnection::new("https://shop.example.com/", "ck", "cs");
        assert_eq!(conn.base_url(), "https://shop.example.com");

        let conn = WcConnection::new("https://shop.example.com", "ck", "cs");
        assert_eq!(conn.base_url(), "https://shop.example.com");
    }

    #[test]
    fn test_debug_masks_secret() {
        let conn = WcConnection::new("https://shop.example.com", "ck_live", "cs_very_secret");
        let printed = format!("{:?}", conn);
        assert!(printed.contains("ck_live"));
        assert!(!printed.contains("cs_very_secret"));
    }
}
