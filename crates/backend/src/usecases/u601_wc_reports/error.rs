use thiserror::Error;

/// Ошибки получения отчётов.
///
/// Отказ, после которого отчёт деградирует до пустого результата
/// (заказы, ряд по товарам), ошибкой не считается.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Сетевая ошибка: DNS, соединение, чтение тела ответа
    #[error("Network error while requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Успешный HTTP-статус, но тело не является JSON
    #[error("Failed to parse JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Не-2xx от последнего опрошенного API
    #[error("Failed to fetch {report}: {status_text}")]
    Upstream {
        report: &'static str,
        status: u16,
        status_text: String,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;
