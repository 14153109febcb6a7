//! Comparison display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::{ComparisonInsights, RankedHome};

use super::format::{format_percentage, pounds};

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "#")]
    rank: String,
    #[tabled(rename = "Care Home")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "CQC")]
    cqc: String,
    #[tabled(rename = "Weekly")]
    weekly: String,
    #[tabled(rename = "5-Year Total")]
    total: String,
    #[tabled(rename = "Monthly Avg")]
    monthly: String,
    #[tabled(rename = "London Equiv.")]
    london: String,
    #[tabled(rename = "Saving vs London")]
    savings: String,
}

/// Format the ranking as a table, marking the selected home
pub fn format_ranking(ranked: &[RankedHome], selected: Option<&str>, symbol: &str) -> String {
    if ranked.is_empty() {
        return "No care homes to compare.".to_string();
    }

    let rows = ranked.iter().map(|row| {
        let marker = if selected == Some(row.key.as_str()) { "▶" } else { "" };
        RankingRow {
            rank: format!("{}{}", marker, row.rank),
            name: row.name.clone(),
            location: row.location.clone(),
            cqc: row.cqc_rating.to_string(),
            weekly: pounds(row.weekly_fee, symbol),
            total: pounds(row.total, symbol),
            monthly: pounds(row.monthly_average, symbol),
            london: pounds(row.london_equivalent, symbol),
            savings: pounds(row.london_savings, symbol),
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Sentences describing where the selected home sits in the ranking
pub fn format_insights(insights: &ComparisonInsights, total_homes: usize, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Ranked {} of {} on five-year cost.\n",
        insights.rank, total_homes
    ));

    if insights.is_cheapest {
        output.push_str("This is the most affordable home in the comparison.\n");
    } else {
        output.push_str(&format!(
            "Costs {} more than the cheapest home.\n",
            pounds(insights.extra_vs_cheapest, symbol)
        ));
    }

    if insights.is_most_expensive {
        output.push_str("This is the most expensive home in the comparison.\n");
    } else {
        output.push_str(&format!(
            "Saves {} ({}) against the most expensive home.\n",
            pounds(insights.saving_vs_most_expensive, symbol),
            format_percentage(insights.saving_pct_vs_most_expensive)
        ));
    }

    let difference = insights.difference_vs_average;
    let direction = if difference > 0.0 { "above" } else { "below" };
    output.push_str(&format!(
        "{} {} the average.\n",
        pounds(difference.abs(), symbol),
        direction
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_catalogue;
    use crate::services::compare_homes;

    #[test]
    fn test_format_ranking_marks_selection() {
        let ranked = compare_homes(&default_catalogue()).unwrap();
        let output = format_ranking(&ranked, Some("metchley_manor"), "£");

        assert!(output.contains("5-Year Total"));
        assert!(output.contains("Edgbaston Manor Care Home"));
        assert!(output.contains("CQC"));
        assert!(output.contains("Outstanding"));
        assert_eq!(output.matches('▶').count(), 1);
    }

    #[test]
    fn test_format_ranking_empty() {
        assert_eq!(format_ranking(&[], None, "£"), "No care homes to compare.");
    }

    #[test]
    fn test_insights_for_cheapest_home() {
        let ranked = compare_homes(&default_catalogue()).unwrap();
        let cheapest = ranked[0].key.clone();
        let insights = ComparisonInsights::for_selection(&ranked, &cheapest).unwrap();
        let output = format_insights(&insights, ranked.len(), "£");

        assert!(output.starts_with("Ranked 1 of 5"));
        assert!(output.contains("most affordable"));
        assert!(output.contains("below the average"));
    }

    #[test]
    fn test_insights_for_most_expensive_home() {
        let ranked = compare_homes(&default_catalogue()).unwrap();
        let last = ranked[ranked.len() - 1].key.clone();
        let insights = ComparisonInsights::for_selection(&ranked, &last).unwrap();
        let output = format_insights(&insights, ranked.len(), "£");

        assert!(output.contains("more than the cheapest"));
        assert!(output.contains("most expensive home in the comparison"));
        assert!(output.contains("above the average"));
    }
}
