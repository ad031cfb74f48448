//! Сырые ответы WooCommerce Reports API.
//!
//! Две версии API отдают разные структуры, поэтому на каждую версию и тип
//! отчёта своя модель. Все поля необязательные: отсутствующее, `null`,
//! нечисловое или структурно неверное значение читается как отсутствующее
//! и не роняет разбор всего ответа.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// wc-analytics (современный API)
// ============================================================================

/// Подытоги выручки (`totals` и `intervals[].subtotals`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsRevenueSubtotals {
    #[serde(deserialize_with = "lenient_number")]
    pub gross_sales: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub orders_count: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub items_sold: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub refunds: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub taxes: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub shipping: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub discounts: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsRevenueInterval {
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subtotals: AnalyticsRevenueSubtotals,
}

/// GET /wc-analytics/reports/revenue/stats
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsRevenueResponse {
    #[serde(deserialize_with = "lenient")]
    pub totals: AnalyticsRevenueSubtotals,
    #[serde(deserialize_with = "lenient_vec")]
    pub intervals: Vec<AnalyticsRevenueInterval>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsOrdersSubtotals {
    #[serde(deserialize_with = "lenient_number")]
    pub orders_count: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_order_value: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub refunds: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsOrdersInterval {
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subtotals: AnalyticsOrdersSubtotals,
}

/// GET /wc-analytics/reports/orders/stats
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsOrdersResponse {
    #[serde(deserialize_with = "lenient")]
    pub totals: AnalyticsOrdersSubtotals,
    #[serde(deserialize_with = "lenient_vec")]
    pub intervals: Vec<AnalyticsOrdersInterval>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsExtendedInfo {
    #[serde(deserialize_with = "lenient_number")]
    pub product_id: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsProductSubtotals {
    #[serde(deserialize_with = "lenient_number")]
    pub items_sold: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_vec")]
    pub products: Vec<AnalyticsProductEntry>,
}

/// Строка топа товаров. Форма строки зависит от версии WooCommerce Admin,
/// поэтому читаются все известные варианты полей.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsProductRow {
    #[serde(deserialize_with = "lenient_number")]
    pub product_id: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub id: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub extended_info: AnalyticsExtendedInfo,
    #[serde(deserialize_with = "lenient")]
    pub subtotals: AnalyticsProductSubtotals,
}

/// GET /wc-analytics/reports/products/stats (топ товаров).
///
/// Строки могут прийти под любым из ключей `data`, `rows`, `items`, `intervals`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsTopProductsResponse {
    #[serde(deserialize_with = "lenient_vec")]
    pub data: Vec<AnalyticsProductRow>,
    #[serde(deserialize_with = "lenient_vec")]
    pub rows: Vec<AnalyticsProductRow>,
    #[serde(deserialize_with = "lenient_vec")]
    pub items: Vec<AnalyticsProductRow>,
    #[serde(deserialize_with = "lenient_vec")]
    pub intervals: Vec<AnalyticsProductRow>,
}

/// Товар внутри интервала временного ряда
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsProductEntry {
    #[serde(deserialize_with = "lenient_number")]
    pub product_id: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub id: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub items_sold: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub net_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsProductBucket {
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subtotals: AnalyticsProductSubtotals,
    #[serde(deserialize_with = "lenient_vec")]
    pub products: Vec<AnalyticsProductEntry>,
}

/// GET /wc-analytics/reports/products/stats?interval=... (ряд по товарам)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsProductStatsResponse {
    #[serde(deserialize_with = "lenient_vec")]
    pub intervals: Vec<AnalyticsProductBucket>,
}

// ============================================================================
// wc/v3 (устаревший API)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacySalesPoint {
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_sales: Option<f64>,
}

/// GET /wc/v3/reports/sales
///
/// Реальный API отдаёт массив из одного отчёта; принимаются обе формы.
#[derive(Debug, Clone, Default)]
pub struct LegacySalesResponse {
    pub total_sales: Option<f64>,
    pub sales: Vec<LegacySalesPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LegacySalesReport {
    #[serde(deserialize_with = "lenient_number")]
    total_sales: Option<f64>,
    #[serde(deserialize_with = "lenient_vec")]
    sales: Vec<LegacySalesPoint>,
}

impl<'de> Deserialize<'de> for LegacySalesResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let report: LegacySalesReport = match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().next().map(coerce).unwrap_or_default(),
            other => coerce(other),
        };
        Ok(LegacySalesResponse {
            total_sales: report.total_sales,
            sales: report.sales,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyTopSeller {
    #[serde(deserialize_with = "lenient_number")]
    pub product_id: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub product: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub total: Option<f64>,
}

/// GET /wc/v3/reports/top_sellers: плоский массив, не-массив читается как пустой
#[derive(Debug, Clone, Default)]
pub struct LegacyTopSellersResponse {
    pub items: Vec<LegacyTopSeller>,
}

impl<'de> Deserialize<'de> for LegacyTopSellersResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(LegacyTopSellersResponse {
            items: lenient_vec(deserializer)?,
        })
    }
}

// ============================================================================
// Терпимые десериализаторы
// ============================================================================

/// Число из JSON-числа или числовой строки; всё остальное (и не-конечные
/// значения) считается отсутствующим.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(value))
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(coerce).collect(),
        _ => Vec::new(),
    })
}

fn coerce<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}

/// Разобрать тело ответа в модель; структурно неверный JSON даёт пустую модель
pub fn parse<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    coerce(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_coercion() {
        assert_eq!(number_from_value(&json!(12.5)), Some(12.5));
        assert_eq!(number_from_value(&json!("50")), Some(50.0));
        assert_eq!(number_from_value(&json!(" 7.25 ")), Some(7.25));
        assert_eq!(number_from_value(&json!(-3)), Some(-3.0));
        assert_eq!(number_from_value(&json!("")), None);
        assert_eq!(number_from_value(&json!("abc")), None);
        assert_eq!(number_from_value(&json!("inf")), None);
        assert_eq!(number_from_value(&json!(null)), None);
        assert_eq!(number_from_value(&json!({"amount": 1})), None);
    }

    #[test]
    fn test_wrong_shapes_are_treated_as_absent() {
        let raw: AnalyticsRevenueResponse = parse(json!({
            "totals": "n/a",
            "intervals": {"date": "2024-01-01"}
        }));
        assert!(raw.totals.gross_sales.is_none());
        assert!(raw.intervals.is_empty());

        let raw: AnalyticsRevenueResponse = parse(json!({
            "totals": {"gross_sales": "12.50", "net_revenue": [1]},
            "intervals": [42, {"date": 20240101, "subtotals": {"gross_sales": 3}}]
        }));
        assert_eq!(raw.totals.gross_sales, Some(12.5));
        assert!(raw.totals.net_revenue.is_none());
        assert_eq!(raw.intervals.len(), 2);
        assert!(raw.intervals[0].date.is_none());
        assert_eq!(raw.intervals[1].date.as_deref(), Some("20240101"));
    }

    #[test]
    fn test_legacy_sales_accepts_object_and_array() {
        let raw: LegacySalesResponse = parse(json!({"total_sales": "50", "sales": []}));
        assert_eq!(raw.total_sales, Some(50.0));

        let raw: LegacySalesResponse =
            parse(json!([{"total_sales": "75.00", "sales": [{"date": "2024-01-02", "total_sales": "5"}]}]));
        assert_eq!(raw.total_sales, Some(75.0));
        assert_eq!(raw.sales.len(), 1);
        assert_eq!(raw.sales[0].total_sales, Some(5.0));
    }

    #[test]
    fn test_legacy_top_sellers_non_array_is_empty() {
        let raw: LegacyTopSellersResponse = parse(json!({"code": "rest_no_route"}));
        assert!(raw.items.is_empty());

        let raw: LegacyTopSellersResponse =
            parse(json!([{"product_id": 3, "title": "Mug", "quantity": 2}]));
        assert_eq!(raw.items.len(), 1);
        assert_eq!(raw.items[0].title.as_deref(), Some("Mug"));
    }
}
