use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::usecases::u601_wc_reports::{
    Interval, OrdersStats, OrdersStatsRequest, ProductStatsPoint, ProductStatsRequest,
    RangeToken, ReportPeriod, RevenueStats, RevenueStatsRequest, RevenueSummary,
    RevenueSummaryRequest, TopProductItem, TopProductsRequest,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::usecases::u601_wc_reports::ReportError;

/// Query-параметры отчётов: `range`, `after`, `before`, `interval`,
/// плюс `limit`, `product_ids`, `window` для отдельных отчётов
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub range: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub interval: Option<String>,
    pub limit: Option<u32>,
    /// Список id через запятую
    pub product_ids: Option<String>,
    pub window: Option<usize>,
}

impl ReportParams {
    fn period(&self) -> ReportPeriod {
        ReportPeriod {
            range: self.range.as_deref().map(RangeToken::from),
            after: self.after.clone(),
            before: self.before.clone(),
        }
    }

    fn interval(&self) -> Result<Option<Interval>, StatusCode> {
        self.interval
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Interval>)
            .transpose()
            .map_err(|e| {
                tracing::warn!("Bad report request: {}", e);
                StatusCode::BAD_REQUEST
            })
    }

    fn product_ids(&self) -> Result<Vec<i64>, StatusCode> {
        let Some(raw) = self.product_ids.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>().map_err(|_| {
                    tracing::warn!("Bad report request: invalid product id '{}'", s);
                    StatusCode::BAD_REQUEST
                })
            })
            .collect()
    }
}

fn upstream_failure(report: &str, e: ReportError) -> StatusCode {
    tracing::error!("Failed to build {} report: {}", report, e);
    StatusCode::BAD_GATEWAY
}

/// GET /api/reports/revenue
pub async fn revenue_stats(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<RevenueStats>, StatusCode> {
    let request = RevenueStatsRequest {
        period: params.period(),
        interval: params.interval()?,
    };
    state
        .reports
        .get_revenue_stats(&request)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("revenue", e))
}

/// GET /api/reports/revenue/summary
pub async fn revenue_summary(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<RevenueSummary>, StatusCode> {
    let request = RevenueSummaryRequest {
        revenue: RevenueStatsRequest {
            period: params.period(),
            interval: params.interval()?,
        },
        window: params.window,
    };
    state
        .reports
        .get_revenue_summary(&request)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("revenue summary", e))
}

/// GET /api/reports/top-products
pub async fn top_products(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<TopProductItem>>, StatusCode> {
    let request = TopProductsRequest {
        period: params.period(),
        limit: params.limit,
    };
    state
        .reports
        .get_top_products(&request)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("top products", e))
}

/// GET /api/reports/orders
pub async fn orders_stats(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<OrdersStats>, StatusCode> {
    let request = OrdersStatsRequest {
        period: params.period(),
        interval: params.interval()?,
    };
    state
        .reports
        .get_orders_stats(&request)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("orders", e))
}

/// GET /api/reports/products
pub async fn product_stats(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<ProductStatsPoint>>, StatusCode> {
    let request = ProductStatsRequest {
        product_ids: params.product_ids()?,
        period: params.period(),
        interval: params.interval()?,
    };
    state
        .reports
        .get_product_stats(&request)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("product stats", e))
}
