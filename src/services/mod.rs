//! Services for data loading and aggregation

pub mod aggregator;
pub mod api;
pub mod dashboard;
pub mod data_loader;

pub use aggregator::{LogAggregator, MAX_WINDOW_DAYS};
pub use api::{DashboardApi, HttpApiClient};
pub use dashboard::{DashboardScreen, DashboardView};
pub use data_loader::{DashboardSnapshot, DataLoaderService};
