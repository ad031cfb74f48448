pub mod u601_wc_reports;
