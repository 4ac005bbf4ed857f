//! Summary card descriptors

use serde::Serialize;

use super::format::{format_currency, format_duration_ms, format_number, format_percent};
use crate::types::{ResourceCounts, SummaryStats};

/// Number of cards in the primary row; the rest only show when there is room
pub const PRIMARY_CARD_COUNT: usize = 4;

/// Semantic color of a card, mapped to a theme color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    Primary,
    Success,
    Warning,
    Danger,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
    pub tone: CardTone,
}

impl SummaryCard {
    fn new(label: &str, value: String, tone: CardTone) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone,
        }
    }
}

/// Eight execution cards; the first [`PRIMARY_CARD_COUNT`] form the primary row
pub fn build_summary_cards(stats: &SummaryStats, currency_symbol: &str) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new(
            "Total Executions",
            format_number(stats.total_executions),
            CardTone::Primary,
        ),
        SummaryCard::new(
            "Success Rate",
            format_percent(stats.success_rate),
            CardTone::Success,
        ),
        SummaryCard::new(
            "Avg Latency",
            format_duration_ms(stats.avg_duration_ms),
            CardTone::Info,
        ),
        SummaryCard::new(
            "Total Cost",
            format_currency(stats.total_cost(), currency_symbol),
            CardTone::Warning,
        ),
        SummaryCard::new(
            "Successful",
            format_number(stats.successful_executions),
            CardTone::Success,
        ),
        SummaryCard::new(
            "Failed",
            format_number(stats.failed_executions),
            CardTone::Danger,
        ),
        SummaryCard::new(
            "Input Tokens",
            format_number(stats.total_input_tokens),
            CardTone::Info,
        ),
        SummaryCard::new(
            "Output Tokens",
            format_number(stats.total_output_tokens),
            CardTone::Info,
        ),
    ]
}

pub fn build_resource_cards(counts: &ResourceCounts) -> Vec<SummaryCard> {
    vec![
        SummaryCard::new("Models", format_number(counts.models), CardTone::Primary),
        SummaryCard::new("Prompts", format_number(counts.prompts), CardTone::Info),
        SummaryCard::new("API Keys", format_number(counts.api_keys), CardTone::Warning),
        SummaryCard::new("Workflows", format_number(counts.workflows), CardTone::Success),
        SummaryCard::new(
            "Credential Providers",
            format_number(counts.credential_providers),
            CardTone::Primary,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> SummaryStats {
        SummaryStats {
            total_executions: 12_345,
            successful_executions: 12_000,
            failed_executions: 345,
            success_rate: 97.205,
            avg_duration_ms: 842.4,
            total_input_tokens: 1_500_000,
            total_output_tokens: 250_000,
            total_tokens: 1_750_000,
            total_cost_micros: 42_123_456,
        }
    }

    #[test]
    fn test_summary_cards_order_and_values() {
        let cards = build_summary_cards(&sample_stats(), "$");
        let pairs: Vec<(&str, &str)> = cards
            .iter()
            .map(|c| (c.label.as_str(), c.value.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Total Executions", "12,345"),
                ("Success Rate", "97.2%"),
                ("Avg Latency", "842ms"),
                ("Total Cost", "$42.1235"),
                ("Successful", "12,000"),
                ("Failed", "345"),
                ("Input Tokens", "1,500,000"),
                ("Output Tokens", "250,000"),
            ]
        );
    }

    #[test]
    fn test_summary_cards_default_stats() {
        let cards = build_summary_cards(&SummaryStats::default(), "€");
        assert_eq!(cards.len(), 8);
        assert_eq!(cards[1].value, "0.0%");
        assert_eq!(cards[2].value, "0ms");
        assert_eq!(cards[3].value, "€0.0000");
    }

    #[test]
    fn test_summary_cards_tones() {
        let cards = build_summary_cards(&sample_stats(), "$");
        assert_eq!(cards[0].tone, CardTone::Primary);
        assert_eq!(cards[5].tone, CardTone::Danger);
    }

    #[test]
    fn test_resource_cards() {
        let counts = ResourceCounts {
            models: 12,
            prompts: 1_204,
            api_keys: 3,
            workflows: 0,
            credential_providers: 2,
        };
        let cards = build_resource_cards(&counts);

        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].label, "Models");
        assert_eq!(cards[1].value, "1,204");
        assert_eq!(cards[3].value, "0");
        assert_eq!(cards[4].label, "Credential Providers");
    }
}
