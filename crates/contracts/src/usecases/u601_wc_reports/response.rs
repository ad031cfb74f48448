use serde::{Deserialize, Serialize};

/// Абсолютные границы периода (UTC, ISO-8601)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub after: String,
    pub before: String,
}

// ============================================================================
// Выручка
// ============================================================================

/// Итоги по выручке.
///
/// Современный API заполняет все поля (отсутствующие значения = 0).
/// Устаревший API умеет отдавать только `total_sales`, остальные поля
/// остаются `None` и не сериализуются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_sold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounts: Option<f64>,
}

/// Точка временного ряда выручки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueIntervalPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub values: RevenueTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueStats {
    pub totals: RevenueTotals,
    /// В порядке, полученном от API (не сортируется)
    pub intervals: Vec<RevenueIntervalPoint>,
}

/// Сводка по ряду `total_sales`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub totals: RevenueTotals,
    pub sum: f64,
    pub avg: f64,
    pub moving_average: Vec<f64>,
    /// Прирост последнего интервала к предыдущему (0.1 = +10%)
    pub growth: Option<f64>,
}

// ============================================================================
// Заказы
// ============================================================================

/// Итоги по заказам. Пустой объект `{}` означает, что отчёт недоступен.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_order_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunds: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersIntervalPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub values: OrdersTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersStats {
    pub totals: OrdersTotals,
    pub intervals: Vec<OrdersIntervalPoint>,
}

// ============================================================================
// Товары
// ============================================================================

/// Позиция топа товаров
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProductItem {
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: f64,
    /// Выручка по товару
    pub total: f64,
}

/// Строка временного ряда по товару: одна на пару (дата, товар)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStatsPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub product_id: i64,
    pub quantity: f64,
    pub net_revenue: f64,
}
