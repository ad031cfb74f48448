use contracts::usecases::u601_wc_reports::{
    OrdersIntervalPoint, OrdersStats, OrdersTotals, ProductStatsPoint, RevenueIntervalPoint,
    RevenueStats, RevenueTotals, TopProductItem,
};

use super::models::{
    AnalyticsOrdersResponse, AnalyticsOrdersSubtotals, AnalyticsProductRow,
    AnalyticsProductStatsResponse, AnalyticsRevenueResponse, AnalyticsRevenueSubtotals,
    AnalyticsTopProductsResponse, LegacySalesResponse, LegacyTopSellersResponse,
};

/// Ключи, под которыми wc-analytics может вернуть строки топа товаров,
/// в порядке приоритета. Берётся первый непустой список.
const TOP_PRODUCT_ROW_SOURCES: [fn(&AnalyticsTopProductsResponse) -> &[AnalyticsProductRow]; 4] =
    [rows_data, rows_rows, rows_items, rows_intervals];

fn rows_data(r: &AnalyticsTopProductsResponse) -> &[AnalyticsProductRow] {
    &r.data
}

fn rows_rows(r: &AnalyticsTopProductsResponse) -> &[AnalyticsProductRow] {
    &r.rows
}

fn rows_items(r: &AnalyticsTopProductsResponse) -> &[AnalyticsProductRow] {
    &r.items
}

fn rows_intervals(r: &AnalyticsTopProductsResponse) -> &[AnalyticsProductRow] {
    &r.intervals
}

// ============================================================================
// Выручка
// ============================================================================

pub fn revenue_from_analytics(raw: AnalyticsRevenueResponse) -> RevenueStats {
    RevenueStats {
        totals: revenue_totals(&raw.totals),
        intervals: raw
            .intervals
            .into_iter()
            .map(|p| RevenueIntervalPoint {
                values: revenue_totals(&p.subtotals),
                date: p.date,
            })
            .collect(),
    }
}

/// `gross_sales` современного API соответствует `total_sales`
fn revenue_totals(s: &AnalyticsRevenueSubtotals) -> RevenueTotals {
    RevenueTotals {
        total_sales: Some(or_zero(s.gross_sales)),
        net_revenue: Some(or_zero(s.net_revenue)),
        orders_count: Some(or_zero(s.orders_count)),
        items_sold: Some(or_zero(s.items_sold)),
        refunds: Some(or_zero(s.refunds)),
        taxes: Some(or_zero(s.taxes)),
        shipping: Some(or_zero(s.shipping)),
        discounts: Some(or_zero(s.discounts)),
    }
}

/// Устаревший отчёт знает только `total_sales`; остальные итоги отсутствуют
pub fn revenue_from_legacy(raw: LegacySalesResponse) -> RevenueStats {
    RevenueStats {
        totals: RevenueTotals {
            total_sales: Some(or_zero(raw.total_sales)),
            ..Default::default()
        },
        intervals: raw
            .sales
            .into_iter()
            .map(|p| RevenueIntervalPoint {
                date: p.date,
                values: RevenueTotals {
                    total_sales: Some(or_zero(p.total_sales)),
                    ..Default::default()
                },
            })
            .collect(),
    }
}

// ============================================================================
// Топ товаров
// ============================================================================

pub fn top_products_from_analytics(raw: &AnalyticsTopProductsResponse) -> Vec<TopProductItem> {
    let rows = TOP_PRODUCT_ROW_SOURCES
        .iter()
        .map(|source| source(raw))
        .find(|rows| !rows.is_empty())
        .unwrap_or(&[]);

    rows.iter()
        .map(|row| TopProductItem {
            product_id: product_id(&[row.product_id, row.extended_info.product_id, row.id]),
            name: first_name(&[&row.extended_info.name, &row.name]),
            quantity: first_number(&[row.subtotals.items_sold, row.quantity]),
            total: first_number(&[row.subtotals.net_revenue, row.total]),
        })
        .collect()
}

pub fn top_products_from_legacy(raw: LegacyTopSellersResponse) -> Vec<TopProductItem> {
    raw.items
        .into_iter()
        .map(|p| TopProductItem {
            product_id: product_id(&[p.product_id, p.product]),
            name: first_name(&[&p.title, &p.name]),
            quantity: or_zero(p.quantity),
            total: or_zero(p.total),
        })
        .collect()
}

// ============================================================================
// Заказы
// ============================================================================

pub fn orders_from_analytics(raw: AnalyticsOrdersResponse) -> OrdersStats {
    OrdersStats {
        totals: orders_totals(&raw.totals),
        intervals: raw
            .intervals
            .into_iter()
            .map(|p| OrdersIntervalPoint {
                values: orders_totals(&p.subtotals),
                date: p.date,
            })
            .collect(),
    }
}

fn orders_totals(s: &AnalyticsOrdersSubtotals) -> OrdersTotals {
    OrdersTotals {
        orders_count: Some(or_zero(s.orders_count)),
        avg_order_value: Some(or_zero(s.avg_order_value)),
        net_revenue: Some(or_zero(s.net_revenue)),
        refunds: Some(or_zero(s.refunds)),
    }
}

// ============================================================================
// Ряд по товарам
// ============================================================================

/// Развернуть интервалы в плоский список: одна строка на (дату интервала, товар),
/// порядок интервалов и товаров внутри интервала сохраняется
pub fn product_stats_from_analytics(raw: AnalyticsProductStatsResponse) -> Vec<ProductStatsPoint> {
    let mut out = Vec::new();
    for bucket in raw.intervals {
        // Пустой `subtotals.products` не считается ответом: тогда берётся `products`
        let entries = if bucket.subtotals.products.is_empty() {
            bucket.products
        } else {
            bucket.subtotals.products
        };
        for entry in entries {
            out.push(ProductStatsPoint {
                date: bucket.date.clone(),
                product_id: product_id(&[entry.product_id, entry.id]),
                quantity: first_number(&[entry.items_sold, entry.quantity]),
                net_revenue: first_number(&[entry.net_revenue, entry.total]),
            });
        }
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Первое присутствующее ненулевое значение, иначе 0
fn first_number(candidates: &[Option<f64>]) -> f64 {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}

fn product_id(candidates: &[Option<f64>]) -> i64 {
    first_number(candidates).trunc() as i64
}

fn first_name(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
