//! Summary statistics and collection wrappers returned by the backend

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{DashboardError, Result};
use super::execution::micros_to_units;
use super::lenient;

/// Aggregate execution counters computed by the backend.
/// Passed to the presenter unmodified; `Default` is the all-zero fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    #[serde(alias = "totalExecutions")]
    pub total_executions: u64,
    #[serde(alias = "successfulExecutions")]
    pub successful_executions: u64,
    #[serde(alias = "failedExecutions")]
    pub failed_executions: u64,
    /// Percentage in [0, 100]
    #[serde(alias = "successRate")]
    pub success_rate: f64,
    #[serde(alias = "avgDurationMs")]
    pub avg_duration_ms: f64,
    #[serde(alias = "totalInputTokens")]
    pub total_input_tokens: u64,
    #[serde(alias = "totalOutputTokens")]
    pub total_output_tokens: u64,
    #[serde(alias = "totalTokens")]
    pub total_tokens: u64,
    #[serde(alias = "totalCostMicros")]
    pub total_cost_micros: i64,
}

impl SummaryStats {
    pub fn total_cost(&self) -> f64 {
        micros_to_units(self.total_cost_micros)
    }

    /// Reject shapes the presenter cannot display meaningfully
    pub fn validate(&self) -> Result<()> {
        if !self.success_rate.is_finite() || !(0.0..=100.0).contains(&self.success_rate) {
            return Err(DashboardError::InvalidStats(format!(
                "success rate {} outside [0, 100]",
                self.success_rate
            )));
        }
        if !self.avg_duration_ms.is_finite() || self.avg_duration_ms < 0.0 {
            return Err(DashboardError::InvalidStats(format!(
                "average duration {} is not a non-negative number",
                self.avg_duration_ms
            )));
        }
        Ok(())
    }
}

/// List endpoint wrapper `{ items, total }`. Items that fail to decode are
/// skipped; the rest of the page is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Collection<T> {
    #[serde(default = "Vec::new", alias = "data", deserialize_with = "lenient::items")]
    pub items: Vec<T>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Reported total, falling back to the page length when the backend omits it
    pub fn count(&self) -> u64 {
        if self.total > 0 {
            self.total
        } else {
            self.items.len() as u64
        }
    }
}

/// Minimal view of a managed resource; only identity is needed for counting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Number of configured resources per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounts {
    pub models: u64,
    pub prompts: u64,
    pub api_keys: u64,
    pub workflows: u64,
    pub credential_providers: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_default_is_zero() {
        let stats = SummaryStats::default();
        assert_eq!(stats.total_executions, 0);
        assert!((stats.success_rate - 0.0).abs() < f64::EPSILON);
        assert!((stats.total_cost() - 0.0).abs() < f64::EPSILON);
        assert!(stats.validate().is_ok());
    }

    #[test]
    fn test_summary_stats_partial_json() {
        let stats: SummaryStats =
            serde_json::from_str(r#"{"total_executions": 12, "successRate": 91.5}"#).unwrap();
        assert_eq!(stats.total_executions, 12);
        assert!((stats.success_rate - 91.5).abs() < f64::EPSILON);
        assert_eq!(stats.total_tokens, 0);
    }

    #[test]
    fn test_summary_stats_total_cost() {
        let stats = SummaryStats {
            total_cost_micros: 12_345_600,
            ..Default::default()
        };
        assert!((stats.total_cost() - 12.3456).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_out_of_range_rate() {
        let stats = SummaryStats {
            success_rate: 140.0,
            ..Default::default()
        };
        assert!(matches!(
            stats.validate(),
            Err(DashboardError::InvalidStats(_))
        ));

        let stats = SummaryStats {
            success_rate: f64::NAN,
            ..Default::default()
        };
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let stats = SummaryStats {
            avg_duration_ms: -1.0,
            ..Default::default()
        };
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_collection_count_prefers_total() {
        let collection: Collection<ResourceRef> =
            serde_json::from_str(r#"{"items": [{"id": "a"}], "total": 40}"#).unwrap();
        assert_eq!(collection.count(), 40);
    }

    #[test]
    fn test_collection_count_falls_back_to_items() {
        let collection: Collection<ResourceRef> =
            serde_json::from_str(r#"{"data": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        assert_eq!(collection.items.len(), 2);
        assert_eq!(collection.count(), 2);
    }

    #[test]
    fn test_collection_default_is_empty() {
        let collection: Collection<ResourceRef> = Collection::default();
        assert_eq!(collection.count(), 0);
    }
}
