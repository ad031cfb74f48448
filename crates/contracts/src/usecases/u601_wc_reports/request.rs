use serde::{Deserialize, Serialize};

/// Количество позиций в топе товаров по умолчанию
pub const DEFAULT_TOP_PRODUCTS_LIMIT: u32 = 10;

/// Символьный период отчёта.
///
/// Любая неизвестная строка десериализуется в `Unknown` и разрешается
/// так же, как `last_7_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RangeToken {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    /// С начала месяца
    #[serde(rename = "mtd")]
    Mtd,
    /// С начала квартала
    #[serde(rename = "qtd")]
    Qtd,
    /// С начала года
    #[serde(rename = "ytd")]
    Ytd,
    /// Явные границы `after` / `before`
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "unknown")]
    Unknown,
}

impl RangeToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::Last7Days => "last_7_days",
            RangeToken::Last30Days => "last_30_days",
            RangeToken::Mtd => "mtd",
            RangeToken::Qtd => "qtd",
            RangeToken::Ytd => "ytd",
            RangeToken::Custom => "custom",
            RangeToken::Unknown => "unknown",
        }
    }
}

impl From<&str> for RangeToken {
    fn from(value: &str) -> Self {
        match value.trim() {
            "last_7_days" => RangeToken::Last7Days,
            "last_30_days" => RangeToken::Last30Days,
            "mtd" => RangeToken::Mtd,
            "qtd" => RangeToken::Qtd,
            "ytd" => RangeToken::Ytd,
            "custom" => RangeToken::Custom,
            _ => RangeToken::Unknown,
        }
    }
}

impl From<String> for RangeToken {
    fn from(value: String) -> Self {
        RangeToken::from(value.as_str())
    }
}

/// Шаг группировки интервалов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    #[default]
    Day,
    Week,
    Month,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
        }
    }
}

impl std::str::FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Interval::Day),
            "week" => Ok(Interval::Week),
            "month" => Ok(Interval::Month),
            other => Err(format!("Unknown interval: {}", other)),
        }
    }
}

/// Период отчёта: символьный токен и (для `custom`) явные границы в ISO-8601
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    #[serde(default)]
    pub range: Option<RangeToken>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

impl ReportPeriod {
    pub fn range(range: RangeToken) -> Self {
        Self {
            range: Some(range),
            after: None,
            before: None,
        }
    }

    pub fn custom(after: impl Into<String>, before: impl Into<String>) -> Self {
        Self {
            range: Some(RangeToken::Custom),
            after: Some(after.into()),
            before: Some(before.into()),
        }
    }
}

/// Запрос статистики выручки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStatsRequest {
    #[serde(default)]
    pub period: ReportPeriod,
    #[serde(default)]
    pub interval: Option<Interval>,
}

/// Запрос топа товаров по чистой выручке
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProductsRequest {
    #[serde(default)]
    pub period: ReportPeriod,
    /// Максимум позиций; `None` и `0` означают значение по умолчанию
    #[serde(default)]
    pub limit: Option<u32>,
}

impl TopProductsRequest {
    pub fn effective_limit(&self) -> u32 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }
}

/// Запрос статистики заказов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersStatsRequest {
    #[serde(default)]
    pub period: ReportPeriod,
    #[serde(default)]
    pub interval: Option<Interval>,
}

/// Запрос временного ряда по товарам
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStatsRequest {
    /// Фильтр по товарам; пустой список означает все товары
    #[serde(default)]
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub period: ReportPeriod,
    #[serde(default)]
    pub interval: Option<Interval>,
}

/// Запрос сводки по выручке (сумма, среднее, скользящее среднее, прирост)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummaryRequest {
    #[serde(default)]
    pub revenue: RevenueStatsRequest,
    /// Окно скользящего среднего в интервалах (по умолчанию 7)
    #[serde(default)]
    pub window: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_token_parses_known_and_unknown_values() {
        let tokens: Vec<RangeToken> =
            serde_json::from_str(r#"["last_7_days","last_30_days","mtd","qtd","ytd","custom","last_decade"]"#)
                .unwrap();
        assert_eq!(
            tokens,
            vec![
                RangeToken::Last7Days,
                RangeToken::Last30Days,
                RangeToken::Mtd,
                RangeToken::Qtd,
                RangeToken::Ytd,
                RangeToken::Custom,
                RangeToken::Unknown,
            ]
        );
        assert_eq!(serde_json::to_string(&RangeToken::Last30Days).unwrap(), "\"last_30_days\"");
    }

    #[test]
    fn test_range_token_as_str_matches_wire_name() {
        for token in [
            RangeToken::Last7Days,
            RangeToken::Last30Days,
            RangeToken::Mtd,
            RangeToken::Qtd,
            RangeToken::Ytd,
            RangeToken::Custom,
        ] {
            assert_eq!(RangeToken::from(token.as_str()), token);
            assert_eq!(serde_json::to_string(&token).unwrap(), format!("\"{}\"", token.as_str()));
        }
    }

    #[test]
    fn test_interval_defaults_to_day() {
        let req: RevenueStatsRequest = serde_json::from_str(r#"{"period":{"range":"mtd"}}"#).unwrap();
        assert_eq!(req.interval.unwrap_or_default(), Interval::Day);
        assert_eq!(req.period.range, Some(RangeToken::Mtd));
        assert_eq!("week".parse::<Interval>().unwrap(), Interval::Week);
        assert!("hour".parse::<Interval>().is_err());
    }

    #[test]
    fn test_top_products_limit_defaults() {
        let mut req = TopProductsRequest::default();
        assert_eq!(req.effective_limit(), 10);
        req.limit = Some(0);
        assert_eq!(req.effective_limit(), 10);
        req.limit = Some(3);
        assert_eq!(req.effective_limit(), 3);
    }
}
