use axum::{routing::get, Router};

use crate::{handlers, state::AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // U601 WOOCOMMERCE REPORTS
        // ========================================
        .route(
            "/api/reports/revenue",
            get(handlers::u601_wc_reports::revenue_stats),
        )
        .route(
            "/api/reports/revenue/summary",
            get(handlers::u601_wc_reports::revenue_summary),
        )
        .route(
            "/api/reports/top-products",
            get(handlers::u601_wc_reports::top_products),
        )
        .route(
            "/api/reports/orders",
            get(handlers::u601_wc_reports::orders_stats),
        )
        .route(
            "/api/reports/products",
            get(handlers::u601_wc_reports::product_stats),
        )
        .with_state(state)
}
