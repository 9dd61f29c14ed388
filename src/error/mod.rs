mod app;
mod config;
mod kpi;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use kpi::{KpiError, MissingMetric};
pub use store::StoreError;
pub use validation::ValidationError;
