pub mod request;
pub mod response;

pub use request::{
    Interval, OrdersStatsRequest, ProductStatsRequest, RangeToken, ReportPeriod,
    RevenueStatsRequest, RevenueSummaryRequest, TopProductsRequest, DEFAULT_TOP_PRODUCTS_LIMIT,
};
pub use response::{
    OrdersIntervalPoint, OrdersStats, OrdersTotals, ProductStatsPoint, ResolvedRange,
    RevenueIntervalPoint, RevenueStats, RevenueSummary, RevenueTotals, TopProductItem,
};
