use async_trait::async_trait;
use contracts::domain::a025_wc_connection::WcConnection;
use serde_json::Value;
use std::time::Duration;

use super::error::{ReportError, ReportResult};

/// Один GET-запрос к Reports API. Учётные данные сюда не входят,
/// их добавляет транспорт.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl ReportQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL с закодированными параметрами, для логов
    pub fn display_url(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, query)
    }
}

/// Ответ транспорта: не-2xx не считается ошибкой, решение о fallback
/// принимает вызывающая сторона
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    /// Тело ответа; есть только у 2xx
    pub json: Option<Value>,
}

impl TransportResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_json(self) -> Value {
        self.json.unwrap_or(Value::Null)
    }
}

/// Транспорт Reports API: один GET без знания о конкретных эндпоинтах
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn get(&self, query: &ReportQuery) -> ReportResult<TransportResponse>;
}

/// HTTP-клиент WooCommerce Reports API (аутентификация ключами в query string)
pub struct WcReportsApiClient {
    client: reqwest::Client,
    consumer_key: String,
    consumer_secret: String,
}

impl WcReportsApiClient {
    /// Без `timeout` время ожидания ответа не ограничено
    pub fn new(connection: &WcConnection, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            consumer_key: connection.consumer_key.clone(),
            consumer_secret: connection.consumer_secret.clone(),
        })
    }
}

#[async_trait]
impl ReportTransport for WcReportsApiClient {
    async fn get(&self, query: &ReportQuery) -> ReportResult<TransportResponse> {
        let url = query.display_url();
        tracing::info!(
            "WC Reports API: GET {} (consumer_key={}, consumer_secret=****)",
            url,
            mask_key(&self.consumer_key)
        );

        let auth = [
            ("consumer_key", self.consumer_key.as_str()),
            ("consumer_secret", self.consumer_secret.as_str()),
        ];
        let response = self
            .client
            .get(&query.url)
            .query(&auth)
            .query(&query.params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ReportError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::info!("WC Reports API response: {} for {}", status, url);

        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("WC Reports API request failed with status {}: {}", status, preview(&body));
            return Ok(TransportResponse {
                status: status.as_u16(),
                status_text,
                json: None,
            });
        }

        let body = response.text().await.map_err(|source| ReportError::Transport {
            url: url.clone(),
            source,
        })?;
        tracing::debug!("WC Reports API response preview: {}", preview(&body));

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => Ok(TransportResponse {
                status: status.as_u16(),
                status_text,
                json: Some(json),
            }),
            Err(source) => {
                tracing::error!("Failed to parse WC Reports API response. Error: {}", source);
                tracing::error!("Response body: {}", preview(&body));
                Err(ReportError::InvalidJson { url, source })
            }
        }
    }
}

/// Для логов оставляем только префикс ключа (`ck_****`)
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(3).collect();
    format!("{}****", prefix)
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::spawn_site;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    fn connection(site_url: &str) -> WcConnection {
        WcConnection::new(site_url, "ck_test", "cs_s&cret/+")
    }

    #[test]
    fn test_display_url_encodes_params() {
        let query = ReportQuery::new("https://shop.example.com/wp-json/wc-analytics/reports/revenue/stats")
            .param("after", "2024-01-01T00:00:00.000Z")
            .param("interval", "day");
        assert_eq!(
            query.display_url(),
            "https://shop.example.com/wp-json/wc-analytics/reports/revenue/stats?after=2024-01-01T00%3A00%3A00.000Z&interval=day"
        );
        assert_eq!(query.get("interval"), Some("day"));
        assert_eq!(query.get("before"), None);
    }

    #[test]
    fn test_mask_key_keeps_prefix_only() {
        assert_eq!(mask_key("ck_0123456789abcdef"), "ck_****");
        assert_eq!(mask_key("ck"), "ck****");
        assert!(!mask_key("ck_0123456789abcdef").contains("0123"));
    }

    #[tokio::test]
    async fn test_get_sends_credentials_and_params() {
        let router = Router::new().route(
            "/echo",
            get(|Query(params): Query<HashMap<String, String>>| async move { Json(params) }),
        );
        let site = spawn_site(router).await;
        let client = WcReportsApiClient::new(&connection(&site), None).unwrap();

        let query = ReportQuery::new(format!("{}/echo", site))
            .param("after", "2024-01-01T00:00:00.000Z")
            .param("products", "1,2");
        let response = client.get(&query).await.unwrap();

        assert!(response.is_ok());
        let json = response.into_json();
        assert_eq!(json["consumer_key"], "ck_test");
        assert_eq!(json["consumer_secret"], "cs_s&cret/+");
        assert_eq!(json["after"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["products"], "1,2");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let router = Router::new().route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let site = spawn_site(router).await;
        let client = WcReportsApiClient::new(&connection(&site), None).unwrap();

        let response = client.get(&ReportQuery::new(format!("{}/broken", site))).await.unwrap();
        assert!(!response.is_ok());
        assert_eq!(response.status, 500);
        assert_eq!(response.status_text, "Internal Server Error");
        assert!(response.json.is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_an_error() {
        let router = Router::new().route("/html", get(|| async { "<html>maintenance</html>" }));
        let site = spawn_site(router).await;
        let client = WcReportsApiClient::new(&connection(&site), None).unwrap();

        let err = client.get(&ReportQuery::new(format!("{}/html", site))).await.unwrap_err();
        assert!(matches!(err, ReportError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Порт освобождается сразу после bind, соединение будет отклонено
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let site = format!("http://{}", addr);
        let client = WcReportsApiClient::new(&connection(&site), Some(Duration::from_secs(5))).unwrap();
        let err = client.get(&ReportQuery::new(format!("{}/any", site))).await.unwrap_err();
        assert!(matches!(err, ReportError::Transport { .. }));
    }
}
