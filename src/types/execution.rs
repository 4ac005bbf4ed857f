//! Execution log types and the views derived from them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Micro-units per currency unit (cost_micros / MICROS_PER_UNIT = cost)
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Convert a micro-unit amount to currency units
pub fn micros_to_units(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_UNIT
}

/// Terminal status of an execution. Anything other than `Success` counts as non-success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Failed,
    Error,
    Timeout,
    Running,
    #[serde(other)]
    Unknown,
}

/// What kind of resource an execution invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionType {
    Model,
    Prompt,
    Workflow,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default, alias = "inputTokens", deserialize_with = "lenient::or_default")]
    pub input_tokens: Option<u64>,
    #[serde(default, alias = "outputTokens", deserialize_with = "lenient::or_default")]
    pub output_tokens: Option<u64>,
    #[serde(default, alias = "totalTokens", deserialize_with = "lenient::or_default")]
    pub total_tokens: Option<u64>,
}

/// One logged invocation of a resource, as returned by the execution log endpoint.
///
/// Every field except the timestamp is optional upstream; the accessors below
/// define the value used when a field is absent. A field of the wrong type
/// decodes as absent, and a null or non-string timestamp as empty (undated).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogRecord {
    #[serde(default, alias = "createdAt", deserialize_with = "lenient::or_default")]
    pub created_at: String,
    #[serde(default, alias = "costMicros", deserialize_with = "lenient::micros")]
    pub cost_micros: Option<i64>,
    #[serde(default, alias = "tokenUsage", deserialize_with = "lenient::or_default")]
    pub token_usage: Option<TokenUsage>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: Option<ExecutionStatus>,
    #[serde(default, alias = "executionType", deserialize_with = "lenient::or_default")]
    pub execution_type: Option<ExecutionType>,
    #[serde(default, alias = "resourceId", deserialize_with = "lenient::or_default")]
    pub resource_id: Option<String>,
    #[serde(default, alias = "resourceName", deserialize_with = "lenient::or_default")]
    pub resource_name: Option<String>,
}

impl ExecutionLogRecord {
    /// Calendar date taken literally from the timestamp's date portion.
    /// No timezone conversion: `2024-03-14T23:30:00-05:00` is 2024-03-14.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let date = self.created_at.get(..10)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Cost in currency units (0.0 when absent)
    pub fn cost(&self) -> f64 {
        micros_to_units(self.cost_micros.unwrap_or(0))
    }

    /// Total tokens (0 when absent)
    pub fn total_tokens(&self) -> u64 {
        self.token_usage
            .as_ref()
            .and_then(|usage| usage.total_tokens)
            .unwrap_or(0)
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(ExecutionStatus::Success)
    }

    pub fn is_model_execution(&self) -> bool {
        self.execution_type == Some(ExecutionType::Model)
    }

    /// Non-empty resource id, if any
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Grouping label: resource name when present, otherwise resource id
    pub fn display_label(&self) -> Option<&str> {
        self.resource_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.resource_id())
    }
}

/// One calendar day of aggregated executions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub cost: f64,
    pub tokens: u64,
    pub executions: u64,
    pub successes: u64,
    pub success_rate: f64,
}

impl DailyBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            cost: 0.0,
            tokens: 0,
            executions: 0,
            successes: 0,
            success_rate: 0.0,
        }
    }

    pub fn add(&mut self, record: &ExecutionLogRecord) {
        self.cost += record.cost();
        self.tokens = self.tokens.saturating_add(record.total_tokens());
        self.executions = self.executions.saturating_add(1);
        if record.is_success() {
            self.successes = self.successes.saturating_add(1);
        }
    }

    /// Recompute `success_rate` from the accumulators
    pub fn finish(&mut self) {
        self.success_rate = if self.executions == 0 {
            0.0
        } else {
            self.successes as f64 / self.executions as f64 * 100.0
        };
    }
}

/// Usage of one model across the fetched logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsageEntry {
    pub model: String,
    pub executions: u64,
    pub tokens: u64,
    pub cost: f64,
}

impl ModelUsageEntry {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            executions: 0,
            tokens: 0,
            cost: 0.0,
        }
    }

    pub fn add(&mut self, record: &ExecutionLogRecord) {
        self.executions = self.executions.saturating_add(1);
        self.tokens = self.tokens.saturating_add(record.total_tokens());
        self.cost += record.cost();
    }
}
