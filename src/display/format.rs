//! Shared formatting helpers for terminal output

use crate::models::Money;

/// Format floating-point pounds rounded to whole pounds, e.g. "£62,400"
pub fn pounds(amount: f64, symbol: &str) -> String {
    Money::from_pounds_f64(amount).format_whole(symbol)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude > 0.0 && magnitude < 0.1 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Two-part bar: basic cost solid, additional cost shaded
pub fn format_stacked_bar(basic: f64, additional: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 {
        return " ".repeat(width);
    }

    let scale = |v: f64| ((v.max(0.0) / max_value) * width as f64).round() as usize;
    let solid = scale(basic).min(width);
    let shaded = scale(basic + additional).min(width).saturating_sub(solid);

    format!(
        "{}{}{}",
        "█".repeat(solid),
        "▒".repeat(shaded),
        " ".repeat(width - solid - shaded)
    )
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds() {
        assert_eq!(pounds(62_400.0, "£"), "£62,400");
        assert_eq!(pounds(1_234_567.49, "£"), "£1,234,567");
        assert_eq!(pounds(-3_840.6, "£"), "-£3,841");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(-12.4), "-12%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_stacked_bar() {
        let bar = format_stacked_bar(60.0, 20.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 6);
        assert_eq!(bar.chars().filter(|c| *c == '▒').count(), 2);
        assert_eq!(bar.chars().count(), 10);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
    }
}
