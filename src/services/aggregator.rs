//! Aggregation of execution logs into dashboard views

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::types::{DailyBucket, ExecutionLogRecord, ModelUsageEntry};

/// Longest daily window the dashboard will bucket (one leap year)
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Stateless reductions over execution logs
pub struct LogAggregator;

impl LogAggregator {
    /// Bucket records into the `window_days` calendar days ending at `reference`'s
    /// UTC date, oldest first. Every day of the window is present even with no records;
    /// records outside the window or without a parseable date are skipped.
    pub fn bucket_by_day(
        records: &[ExecutionLogRecord],
        window_days: u32,
        reference: DateTime<Utc>,
    ) -> Vec<DailyBucket> {
        let end = reference.date_naive();
        let mut buckets: Vec<DailyBucket> = (0..window_days)
            .rev()
            .filter_map(|offset| end.checked_sub_days(Days::new(u64::from(offset))))
            .map(DailyBucket::empty)
            .collect();

        let Some(start) = buckets.first().map(|b| b.date) else {
            return buckets;
        };

        for record in records {
            let Some(date) = record.calendar_date() else {
                tracing::trace!(created_at = %record.created_at, "skipping record without date");
                continue;
            };
            if let Some(index) = Self::bucket_index(start, end, date) {
                buckets[index].add(record);
            }
        }

        for bucket in &mut buckets {
            bucket.finish();
        }
        buckets
    }

    /// Position of `date` in a window starting at `start`, if it falls inside
    fn bucket_index(start: NaiveDate, end: NaiveDate, date: NaiveDate) -> Option<usize> {
        if date < start || date > end {
            return None;
        }
        usize::try_from((date - start).num_days()).ok()
    }

    /// Rank models by execution count, highest first, keeping at most `limit`.
    /// Only model executions with a resource id count; ties keep first-seen order.
    pub fn top_model_usage(records: &[ExecutionLogRecord], limit: usize) -> Vec<ModelUsageEntry> {
        let mut entries: Vec<ModelUsageEntry> = Vec::new();
        let mut index_by_model: HashMap<String, usize> = HashMap::new();

        for record in records {
            if !record.is_model_execution() || record.resource_id().is_none() {
                continue;
            }
            let Some(label) = record.display_label() else {
                continue;
            };

            let index = match index_by_model.get(label) {
                Some(&index) => index,
                None => {
                    entries.push(ModelUsageEntry::new(label));
                    index_by_model.insert(label.to_string(), entries.len() - 1);
                    entries.len() - 1
                }
            };
            entries[index].add(record);
        }

        // sort_by is stable, so equal counts stay in first-seen order
        entries.sort_by(|a, b| b.executions.cmp(&a.executions));
        entries.truncate(limit);
        entries
    }
}
