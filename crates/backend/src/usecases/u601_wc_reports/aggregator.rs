use contracts::domain::a025_wc_connection::WcConnection;
use contracts::usecases::u601_wc_reports::{
    OrdersStats, OrdersStatsRequest, ProductStatsPoint, ProductStatsRequest, ReportPeriod,
    ResolvedRange, RevenueStats, RevenueStatsRequest, RevenueSummary, RevenueSummaryRequest,
    TopProductItem, TopProductsRequest,
};
use std::time::Duration;

use super::error::{ReportError, ReportResult};
use super::models::{self, parse};
use super::normalizer;
use super::range;
use super::wc_reports_api_client::{ReportQuery, ReportTransport, WcReportsApiClient};
use crate::shared::analytics;

/// Современный API (WooCommerce Admin Analytics)
pub const ANALYTICS_API_PATH: &str = "/wp-json/wc-analytics";
/// Устаревший REST API отчётов
pub const LEGACY_API_PATH: &str = "/wp-json/wc/v3";

const DEFAULT_SUMMARY_WINDOW: usize = 7;

/// Агрегатор отчётов WooCommerce.
///
/// Сначала опрашивается wc-analytics; при не-2xx выручка и топ товаров
/// запрашиваются из wc/v3, а заказы и ряд по товарам возвращаются пустыми
/// (аналога в wc/v3 нет). Больше одного fallback не бывает, результаты
/// двух API не смешиваются. Состояния между вызовами нет.
pub struct ReportAggregator<T = WcReportsApiClient> {
    analytics_base: String,
    legacy_base: String,
    transport: T,
}

impl ReportAggregator<WcReportsApiClient> {
    pub fn new(connection: &WcConnection, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let client = WcReportsApiClient::new(connection, timeout)?;
        Ok(Self::with_transport(connection.base_url(), client))
    }
}

impl<T: ReportTransport> ReportAggregator<T> {
    pub fn with_transport(site_url: &str, transport: T) -> Self {
        let base = site_url.trim_end_matches('/');
        Self {
            analytics_base: format!("{}{}", base, ANALYTICS_API_PATH),
            legacy_base: format!("{}{}", base, LEGACY_API_PATH),
            transport,
        }
    }

    /// Выручка за период: wc-analytics, затем wc/v3 `reports/sales`.
    /// Если не ответили оба, возвращается ошибка.
    pub async fn get_revenue_stats(&self, request: &RevenueStatsRequest) -> ReportResult<RevenueStats> {
        let range = resolve_period(&request.period);
        let interval = request.interval.unwrap_or_default();
        tracing::info!(
            "Revenue stats: after={}, before={}, interval={}",
            range.after,
            range.before,
            interval.as_str()
        );

        let query = ReportQuery::new(format!("{}/reports/revenue/stats", self.analytics_base))
            .param("after", &range.after)
            .param("before", &range.before)
            .param("interval", interval.as_str());
        let response = self.transport.get(&query).await?;
        if response.is_ok() {
            let raw: models::AnalyticsRevenueResponse = parse(response.into_json());
            return Ok(normalizer::revenue_from_analytics(raw));
        }

        tracing::warn!(
            "wc-analytics revenue stats returned HTTP {}, falling back to wc/v3 sales report",
            response.status
        );
        let query = ReportQuery::new(format!("{}/reports/sales", self.legacy_base))
            .param("date_min", &range.after)
            .param("date_max", &range.before);
        let response = self.transport.get(&query).await?;
        if !response.is_ok() {
            tracing::error!("wc/v3 sales report returned HTTP {}", response.status);
            return Err(ReportError::Upstream {
                report: "revenue stats",
                status: response.status,
                status_text: response.status_text,
            });
        }

        let raw: models::LegacySalesResponse = parse(response.into_json());
        Ok(normalizer::revenue_from_legacy(raw))
    }

    /// Топ товаров по чистой выручке: wc-analytics, затем wc/v3 `reports/top_sellers`.
    /// Результат обрезается до `limit`.
    pub async fn get_top_products(&self, request: &TopProductsRequest) -> ReportResult<Vec<TopProductItem>> {
        let range = resolve_period(&request.period);
        let limit = request.effective_limit();
        tracing::info!(
            "Top products: after={}, before={}, limit={}",
            range.after,
            range.before,
            limit
        );

        let query = ReportQuery::new(format!("{}/reports/products/stats", self.analytics_base))
            .param("after", &range.after)
            .param("before", &range.before)
            .param("per_page", limit)
            .param("order_by", "net_revenue")
            .param("order", "desc");
        let response = self.transport.get(&query).await?;

        let mut items = if response.is_ok() {
            let raw: models::AnalyticsTopProductsResponse = parse(response.into_json());
            normalizer::top_products_from_analytics(&raw)
        } else {
            tracing::warn!(
                "wc-analytics products stats returned HTTP {}, falling back to wc/v3 top sellers",
                response.status
            );
            let query = ReportQuery::new(format!("{}/reports/top_sellers", self.legacy_base))
                .param("after", &range.after)
                .param("before", &range.before)
                .param("per_page", limit);
            let response = self.transport.get(&query).await?;
            if !response.is_ok() {
                tracing::error!("wc/v3 top sellers returned HTTP {}", response.status);
                return Err(ReportError::Upstream {
                    report: "top products",
                    status: response.status,
                    status_text: response.status_text,
                });
            }
            let raw: models::LegacyTopSellersResponse = parse(response.into_json());
            normalizer::top_products_from_legacy(raw)
        };

        items.truncate(limit as usize);
        Ok(items)
    }

    /// Статистика заказов. Только wc-analytics: при не-2xx возвращается
    /// пустой результат `{totals: {}, intervals: []}` без ошибки.
    pub async fn get_orders_stats(&self, request: &OrdersStatsRequest) -> ReportResult<OrdersStats> {
        let range = resolve_period(&request.period);
        let interval = request.interval.unwrap_or_default();
        tracing::info!(
            "Orders stats: after={}, before={}, interval={}",
            range.after,
            range.before,
            interval.as_str()
        );

        let query = ReportQuery::new(format!("{}/reports/orders/stats", self.analytics_base))
            .param("after", &range.after)
            .param("before", &range.before)
            .param("interval", interval.as_str());
        let response = self.transport.get(&query).await?;
        if !response.is_ok() {
            tracing::warn!(
                "wc-analytics orders stats returned HTTP {}, no wc/v3 equivalent, returning empty stats",
                response.status
            );
            return Ok(OrdersStats::default());
        }

        let raw: models::AnalyticsOrdersResponse = parse(response.into_json());
        Ok(normalizer::orders_from_analytics(raw))
    }

    /// Ряд по товарам, одна строка на (интервал, товар). Только wc-analytics:
    /// при не-2xx возвращается пустой список без ошибки.
    pub async fn get_product_stats(&self, request: &ProductStatsRequest) -> ReportResult<Vec<ProductStatsPoint>> {
        let range = resolve_period(&request.period);
        let interval = request.interval.unwrap_or_default();
        tracing::info!(
            "Product stats: after={}, before={}, interval={}, products={:?}",
            range.after,
            range.before,
            interval.as_str(),
            request.product_ids
        );

        let mut query = ReportQuery::new(format!("{}/reports/products/stats", self.analytics_base))
            .param("after", &range.after)
            .param("before", &range.before)
            .param("interval", interval.as_str());
        if !request.product_ids.is_empty() {
            let ids = request
                .product_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query = query.param("products", ids);
        }

        let response = self.transport.get(&query).await?;
        if !response.is_ok() {
            tracing::warn!(
                "wc-analytics products stats returned HTTP {}, no wc/v3 equivalent, returning empty series",
                response.status
            );
            return Ok(Vec::new());
        }

        let raw: models::AnalyticsProductStatsResponse = parse(response.into_json());
        Ok(normalizer::product_stats_from_analytics(raw))
    }

    /// Сводка по выручке поверх `get_revenue_stats` (та же политика ошибок)
    pub async fn get_revenue_summary(&self, request: &RevenueSummaryRequest) -> ReportResult<RevenueSummary> {
        let stats = self.get_revenue_stats(&request.revenue).await?;
        let window = request.window.unwrap_or(DEFAULT_SUMMARY_WINDOW);

        let series: Vec<f64> = stats
            .intervals
            .iter()
            .map(|p| p.values.total_sales.unwrap_or(0.0))
            .collect();
        let summary = analytics::summarize(&series);
        let growth = match series.as_slice() {
            [.., previous, current] => analytics::compute_growth(*current, *previous),
            _ => None,
        };

        Ok(RevenueSummary {
            totals: stats.totals,
            sum: summary.sum,
            avg: summary.avg,
            moving_average: analytics::moving_average(&series, window),
            growth,
        })
    }
}

fn resolve_period(period: &ReportPeriod) -> ResolvedRange {
    let resolved = range::resolve(period.range, period.after.as_deref(), period.before.as_deref());
    tracing::debug!(
        "Range '{}' resolved to {} .. {}",
        period.range.map(|r| r.as_str()).unwrap_or("default"),
        resolved.after,
        resolved.before
    );
    resolved
}
