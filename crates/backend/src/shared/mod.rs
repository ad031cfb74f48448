pub mod analytics;
pub mod config;
