//! execdash: terminal dashboard for model execution statistics
//!
//! Data flows one way: [`services::DashboardApi`] fetches, [`services::LogAggregator`]
//! buckets and ranks execution logs, [`presenter::ChartPresenter`] turns the result
//! into cards and chart specs. [`services::DashboardView`] drives one refresh.

pub mod cli;
pub mod config;
pub mod logging;
pub mod presenter;
pub mod services;
pub mod tui;
pub mod types;
