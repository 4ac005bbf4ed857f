//! Display formatting for cards and chart ticks

/// Thousands separators: 1234567 -> "1,234,567"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        r => r,
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    out.push_str(&digits[..head]);
    for group in digits.as_bytes()[head..].chunks(3) {
        out.push(',');
        out.extend(group.iter().map(|&b| char::from(b)));
    }
    out
}

/// One decimal with a percent sign: 97.26 -> "97.3%"
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Four decimals behind a currency symbol: 1.5 -> "$1.5000"
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{}{:.4}", symbol, value)
}

/// Whole milliseconds: 812.6 -> "813ms"
pub fn format_duration_ms(value: f64) -> String {
    format!("{}ms", value.round().max(0.0) as u64)
}

/// Short month/day label used on time axes: 2024-03-04 -> "3/4"
pub fn format_short_date(date: chrono::NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}/{}", date.month(), date.day())
}

/// Compact tick label for large axis values (1234 -> "1.2K")
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Keep at most `max_len` characters, marking truncation with "..."
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_len).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn test_format_number_small() {
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn test_format_number_thousand() {
        assert_eq!(format_number(1000), "1,000");
    }

    #[test]
    fn test_format_number_million() {
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(97.26), "97.3%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(33.333), "33.3%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "$"), "$0.0000");
        assert_eq!(format_currency(12.3456, "$"), "$12.3456");
        assert_eq!(format_currency(0.00006, "€"), "€0.0001");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0.0), "0ms");
        assert_eq!(format_duration_ms(812.6), "813ms");
        assert_eq!(format_duration_ms(1500.0), "1500ms");
    }

    #[test]
    fn test_format_short_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(format_short_date(date), "3/14");
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        assert_eq!(format_short_date(date), "11/2");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(0.25), "0.25");
        assert_eq!(format_compact(1_240.0), "1.2K");
        assert_eq!(format_compact(3_400_000.0), "3.4M");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("gpt-4", 20), "gpt-4");
        assert_eq!(truncate_label("abcdef", 6), "abcdef");
        assert_eq!(truncate_label("abcdefg", 6), "abcdef...");
        assert_eq!(truncate_label("모델이름이길다", 3), "모델이...");
    }
}
