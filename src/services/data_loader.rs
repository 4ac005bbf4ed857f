//! Concurrent fetch of everything the dashboard needs
//!
//! The seven backend calls run as independent tasks. Each task maps its own
//! failure to an empty default before the join, so the join only fails when a
//! task itself cannot be joined (panic or runtime shutdown).

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::api::DashboardApi;
use crate::types::{ExecutionLogRecord, ResourceCounts, Result, SummaryStats};

/// Raw inputs for one dashboard refresh
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub counts: ResourceCounts,
    pub stats: SummaryStats,
    pub logs: Vec<ExecutionLogRecord>,
}

/// Fan-out/fan-in loader over a [`DashboardApi`]
pub struct DataLoaderService {
    api: Arc<dyn DashboardApi>,
    log_limit: usize,
}

impl DataLoaderService {
    pub fn new(api: Arc<dyn DashboardApi>, log_limit: usize) -> Self {
        Self { api, log_limit }
    }

    /// Fetch all collections concurrently, substituting empty defaults for failures
    pub async fn load(&self) -> Result<DashboardSnapshot> {
        let api = &self.api;

        let models = spawn_fetch("models", {
            let api = Arc::clone(api);
            async move { api.list_models().await.map(|c| c.count()) }
        });
        let prompts = spawn_fetch("prompts", {
            let api = Arc::clone(api);
            async move { api.list_prompts().await.map(|c| c.count()) }
        });
        let api_keys = spawn_fetch("api_keys", {
            let api = Arc::clone(api);
            async move { api.list_api_keys().await.map(|c| c.count()) }
        });
        let workflows = spawn_fetch("workflows", {
            let api = Arc::clone(api);
            async move { api.list_workflows().await.map(|c| c.count()) }
        });
        let providers = spawn_fetch("credential_providers", {
            let api = Arc::clone(api);
            async move { api.list_credential_providers().await.map(|c| c.count()) }
        });
        let stats = spawn_fetch("execution_stats", {
            let api = Arc::clone(api);
            async move { api.get_execution_stats().await }
        });
        let logs = spawn_fetch("execution_logs", {
            let api = Arc::clone(api);
            let limit = self.log_limit;
            async move { api.list_execution_logs(limit).await.map(|c| c.items) }
        });

        let (models, prompts, api_keys, workflows, credential_providers, stats, logs) =
            tokio::try_join!(models, prompts, api_keys, workflows, providers, stats, logs)?;

        tracing::info!(
            models,
            prompts,
            api_keys,
            workflows,
            credential_providers,
            logs = logs.len(),
            "dashboard data loaded"
        );

        Ok(DashboardSnapshot {
            counts: ResourceCounts {
                models,
                prompts,
                api_keys,
                workflows,
                credential_providers,
            },
            stats,
            logs,
        })
    }
}

/// Spawn one fetch whose failure degrades to `T::default()`
fn spawn_fetch<T, F>(name: &'static str, fetch: F) -> JoinHandle<T>
where
    T: Default + Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    tokio::spawn(async move {
        match fetch.await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(fetch = name, error = %e, "fetch failed, using empty default");
                T::default()
            }
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{Collection, DashboardError, ExecutionStatus, ResourceRef};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory backend; endpoints listed in `failing` return an API error
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub models: u64,
        pub prompts: u64,
        pub stats: SummaryStats,
        pub logs: Vec<ExecutionLogRecord>,
        pub failing: Vec<&'static str>,
        pub requested_limit: AtomicUsize,
    }

    impl FakeApi {
        fn check(&self, endpoint: &'static str) -> Result<()> {
            if self.failing.contains(&endpoint) {
                return Err(DashboardError::Api {
                    status: 500,
                    message: format!("{} unavailable", endpoint),
                });
            }
            Ok(())
        }

        fn refs(n: u64) -> Collection<ResourceRef> {
            Collection {
                items: (0..n)
                    .map(|i| ResourceRef {
                        id: Some(i.to_string()),
                        name: None,
                    })
                    .collect(),
                total: n,
            }
        }
    }

    #[async_trait]
    impl DashboardApi for FakeApi {
        async fn list_models(&self) -> Result<Collection<ResourceRef>> {
            self.check("models")?;
            Ok(Self::refs(self.models))
        }

        async fn list_prompts(&self) -> Result<Collection<ResourceRef>> {
            self.check("prompts")?;
            Ok(Self::refs(self.prompts))
        }

        async fn list_api_keys(&self) -> Result<Collection<ResourceRef>> {
            self.check("api_keys")?;
            Ok(Self::refs(2))
        }

        async fn list_workflows(&self) -> Result<Collection<ResourceRef>> {
            self.check("workflows")?;
            Ok(Self::refs(1))
        }

        async fn list_credential_providers(&self) -> Result<Collection<ResourceRef>> {
            self.check("credential_providers")?;
            Ok(Self::refs(4))
        }

        async fn get_execution_stats(&self) -> Result<SummaryStats> {
            self.check("stats")?;
            Ok(self.stats.clone())
        }

        async fn list_execution_logs(&self, limit: usize) -> Result<Collection<ExecutionLogRecord>> {
            self.check("logs")?;
            self.requested_limit.store(limit, Ordering::SeqCst);
            Ok(Collection {
                items: self.logs.clone(),
                total: self.logs.len() as u64,
            })
        }
    }

    fn sample_log() -> ExecutionLogRecord {
        ExecutionLogRecord {
            created_at: "2024-03-14T12:00:00Z".into(),
            status: Some(ExecutionStatus::Success),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_all_succeed() {
        let api = Arc::new(FakeApi {
            models: 3,
            prompts: 7,
            stats: SummaryStats {
                total_executions: 9,
                ..Default::default()
            },
            logs: vec![sample_log(), sample_log()],
            ..Default::default()
        });

        let snapshot = DataLoaderService::new(api.clone(), 250)
            .load()
            .await
            .unwrap();

        assert_eq!(
            snapshot.counts,
            ResourceCounts {
                models: 3,
                prompts: 7,
                api_keys: 2,
                workflows: 1,
                credential_providers: 4,
            }
        );
        assert_eq!(snapshot.stats.total_executions, 9);
        assert_eq!(snapshot.logs.len(), 2);
        assert_eq!(api.requested_limit.load(Ordering::SeqCst), 250);
    }

    #[tokio::test]
    async fn test_load_individual_failures_fall_back() {
        let api = Arc::new(FakeApi {
            models: 3,
            prompts: 7,
            stats: SummaryStats {
                total_executions: 9,
                ..Default::default()
            },
            logs: vec![sample_log()],
            failing: vec!["prompts", "stats", "logs"],
            ..Default::default()
        });

        let snapshot = DataLoaderService::new(api, 100).load().await.unwrap();

        assert_eq!(snapshot.counts.models, 3);
        assert_eq!(snapshot.counts.prompts, 0);
        assert_eq!(snapshot.stats, SummaryStats::default());
        assert!(snapshot.logs.is_empty());
    }

    #[tokio::test]
    async fn test_load_everything_failing_still_succeeds() {
        let api = Arc::new(FakeApi {
            failing: vec![
                "models",
                "prompts",
                "api_keys",
                "workflows",
                "credential_providers",
                "stats",
                "logs",
            ],
            ..Default::default()
        });

        let snapshot = DataLoaderService::new(api, 100).load().await.unwrap();

        assert_eq!(snapshot.counts, ResourceCounts::default());
        assert_eq!(snapshot.stats, SummaryStats::default());
        assert!(snapshot.logs.is_empty());
    }

    async fn exploding_fetch() -> Result<u64> {
        panic!("task exploded")
    }

    #[tokio::test]
    async fn test_spawn_fetch_panicking_task_fails_join() {
        let handle = spawn_fetch("boom", exploding_fetch());
        let joined: Result<u64> = handle.await.map_err(DashboardError::from);
        assert!(matches!(joined, Err(DashboardError::Join(_))));
    }
}
