//! Dashboard view: fetch, aggregate, present

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::aggregator::LogAggregator;
use super::api::DashboardApi;
use super::data_loader::DataLoaderService;
use crate::config::DashboardSettings;
use crate::presenter::{ChartPresenter, DashboardModel};
use crate::types::Result;

/// Outcome of one render: the whole dashboard or a single error panel
#[derive(Debug)]
pub enum DashboardScreen {
    Ready(Box<DashboardModel>),
    Failed(String),
}

pub struct DashboardView {
    loader: DataLoaderService,
    presenter: ChartPresenter,
    window_days: u32,
    model_limit: usize,
}

impl DashboardView {
    pub fn new(api: Arc<dyn DashboardApi>, settings: &DashboardSettings) -> Self {
        Self {
            loader: DataLoaderService::new(api, settings.log_limit),
            presenter: ChartPresenter::new(
                settings.currency_symbol.clone(),
                settings.label_max_len,
                settings.charts,
            ),
            window_days: settings.window_days,
            model_limit: settings.model_limit,
        }
    }

    /// Render the dashboard as of now
    pub async fn render(&mut self) -> DashboardScreen {
        self.render_at(Utc::now()).await
    }

    /// Render with an explicit reference instant for the daily window
    pub async fn render_at(&mut self, reference: DateTime<Utc>) -> DashboardScreen {
        match self.build(reference).await {
            Ok(model) => DashboardScreen::Ready(Box::new(model)),
            Err(e) => {
                tracing::error!(error = %e, "dashboard render failed");
                // No partial dashboard: drop charts from a previous render too
                self.presenter.clear();
                DashboardScreen::Failed(e.to_string())
            }
        }
    }

    async fn build(&mut self, reference: DateTime<Utc>) -> Result<DashboardModel> {
        let snapshot = self.loader.load().await?;

        let daily = LogAggregator::bucket_by_day(&snapshot.logs, self.window_days, reference);
        let model_usage = LogAggregator::top_model_usage(&snapshot.logs, self.model_limit);

        self.presenter
            .present(&snapshot.stats, &snapshot.counts, daily, model_usage)
    }

    pub fn presenter(&self) -> &ChartPresenter {
        &self.presenter
    }

    /// Release all charts when navigating away from the dashboard
    pub fn leave(&mut self) {
        self.presenter.clear();
    }
}
