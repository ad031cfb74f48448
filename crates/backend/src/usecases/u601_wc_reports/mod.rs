pub mod aggregator;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod range;
pub mod wc_reports_api_client;

pub use aggregator::ReportAggregator;
pub use error::{ReportError, ReportResult};
pub use wc_reports_api_client::{ReportQuery, ReportTransport, TransportResponse, WcReportsApiClient};
