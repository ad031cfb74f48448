use std::sync::Arc;

use crate::usecases::u601_wc_reports::ReportAggregator;

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportAggregator>,
}

impl AppState {
    pub fn new(reports: ReportAggregator) -> Self {
        Self {
            reports: Arc::new(reports),
        }
    }
}
