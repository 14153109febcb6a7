//! Projection display formatting
//!
//! Renders a cost projection as a summary block, a yearly breakdown table and
//! a stacked bar per year.

use crate::models::{CalculationRecord, CostProjection};
use crate::reports::ChartSeries;

use super::format::{format_percentage, format_stacked_bar, pounds, separator};

const BAR_WIDTH: usize = 30;

/// Headline figures for a projection
pub fn format_projection_summary(projection: &CostProjection, symbol: &str) -> String {
    let config = projection.scenario.config();
    let mut output = String::new();

    output.push_str(&format!("{}\n", projection.home_name));
    output.push_str(&format!(
        "  Scenario:         {} ({} inflation, extras x{:.1})\n",
        config.label,
        format_percentage(config.inflation_rate * 100.0),
        config.cost_multiplier
    ));
    output.push_str(&format!("  Duration:         {} years\n", format_years(projection.years)));
    output.push_str(&format!(
        "  Weekly Fee:       {}\n",
        pounds(projection.weekly_fee, symbol)
    ));
    output.push_str(&format!(
        "  Annual Base:      {}\n",
        pounds(projection.annual_base, symbol)
    ));
    output.push_str(&format!(
        "  Registration Fee: {}\n",
        pounds(projection.registration_fee, symbol)
    ));
    output.push_str(&format!(
        "  Deposit:          {} (refundable, not included)\n",
        pounds(projection.deposit, symbol)
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Basic Care:       {}\n",
        pounds(projection.total_basic, symbol)
    ));
    output.push_str(&format!(
        "  Additional:       {}\n",
        pounds(projection.total_additional, symbol)
    ));
    let extras = &projection.additional_breakdown;
    output.push_str(&format!(
        "    Activities {}  Medical {}  Transport {}\n",
        pounds(extras.activities, symbol),
        pounds(extras.medical, symbol),
        pounds(extras.transport, symbol)
    ));
    output.push_str(&format!(
        "  Total Projected:  {}\n",
        pounds(projection.total_projected, symbol)
    ));
    output.push_str(&format!(
        "  Monthly Average:  {}\n",
        pounds(projection.monthly_average(), symbol)
    ));

    output
}

/// Year-by-year table with a stacked bar (basic solid, additional shaded)
pub fn format_yearly_breakdown(
    projection: &CostProjection,
    chart: &ChartSeries,
    symbol: &str,
) -> String {
    if projection.yearly.is_empty() {
        return "No yearly breakdown.".to_string();
    }

    let max = chart.max_year_total() as f64;
    let mut output = String::new();

    output.push_str(&format!(
        "{:<7}  {:>12}  {:>10}  {:>12}  {:>9}  {:>12}  {}\n",
        "Year", "Basic", "Additional", "Total", "Inflation", "Cumulative", "Chart"
    ));
    output.push_str(&format!(
        "{:-<7}  {:->12}  {:->10}  {:->12}  {:->9}  {:->12}  {:-<BAR_WIDTH$}\n",
        "", "", "", "", "", "", ""
    ));

    for (i, year) in projection.yearly.iter().enumerate() {
        let label = if year.year_fraction < 1.0 {
            format!("{} ({})", year.year, format_years(year.year_fraction))
        } else {
            year.year.to_string()
        };
        let cumulative = chart.cumulative.get(i).copied().unwrap_or_default();

        output.push_str(&format!(
            "{:<7}  {:>12}  {:>10}  {:>12}  {:>9}  {:>12}  {}\n",
            label,
            pounds(year.basic_cost, symbol),
            pounds(year.additional_cost, symbol),
            pounds(year.total, symbol),
            format_percentage(year.inflation_pct),
            pounds(cumulative as f64, symbol),
            format_stacked_bar(year.basic_cost, year.additional_cost, max, BAR_WIDTH),
        ));
    }

    output.push_str(&separator(7 + 12 + 10 + 12 + 9 + 12 + BAR_WIDTH + 12));
    output.push('\n');
    output.push_str("█ basic care   ▒ additional services\n");

    output
}

/// Recent calculations, newest first
pub fn format_history(records: &[CalculationRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No calculations yet.".to_string();
    }

    let key_width = records
        .iter()
        .map(|r| r.home_key.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<key_width$}  {:<11}  {:>5}  {:>10}  {:>12}\n",
        "When", "Home", "Scenario", "Years", "Weekly", "Total"
    ));
    output.push_str(&format!(
        "{:-<16}  {:-<key_width$}  {:-<11}  {:->5}  {:->10}  {:->12}\n",
        "", "", "", "", "", ""
    ));

    for record in records {
        output.push_str(&format!(
            "{:<16}  {:<key_width$}  {:<11}  {:>5}  {:>10}  {:>12}\n",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.home_key,
            record.scenario.to_string(),
            format_years(record.years),
            pounds(record.weekly_fee, symbol),
            pounds(record.total_cost, symbol),
        ));
    }

    output
}

/// "3", "2.5", "0.25"
fn format_years(years: f64) -> String {
    let text = format!("{:.2}", years);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_catalogue, Scenario};
    use crate::services::project;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_shows_totals() {
        let home = default_catalogue().remove(0);
        let projection = project(&home, Scenario::Realistic, 1.0).unwrap();
        let output = format_projection_summary(&projection, "£");

        assert!(output.contains("Manor House Care Home"));
        assert!(output.contains("£62,400"));
        assert!(output.contains("£3,840"));
        assert!(output.contains("£66,740"));
        assert!(output.contains("Most Likely"));
    }

    #[test]
    fn test_breakdown_has_one_row_per_year() {
        let home = default_catalogue().remove(0);
        let projection = project(&home, Scenario::Pessimistic, 2.5).unwrap();
        let chart = ChartSeries::from_projection(&projection);
        let output = format_yearly_breakdown(&projection, &chart, "£");

        assert!(output.contains("3 (0.5)"));
        // header, rule, three years, rule, legend
        assert_eq!(output.lines().count(), 7);
    }

    #[test]
    fn test_format_history() {
        let home = default_catalogue().remove(1);
        let projection = project(&home, Scenario::Optimistic, 3.0).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let output = format_history(&[CalculationRecord::from_projection(&projection, at)], "£");

        assert!(output.contains("2025-06-01 09:30"));
        assert!(output.contains("digby_manor"));
        assert!(output.contains("optimistic"));
        assert_eq!(format_history(&[], "£"), "No calculations yet.");
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(3.0), "3");
        assert_eq!(format_years(2.5), "2.5");
        assert_eq!(format_years(0.25), "0.25");
    }
}
