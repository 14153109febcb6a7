//! Cost Report
//!
//! A projection for one home together with its chart series and where the
//! home sits in the catalogue-wide ranking.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::chart::ChartSeries;
use crate::display::format::double_separator;
use crate::display::{
    format_insights, format_projection_summary, format_ranking, format_yearly_breakdown,
};
use crate::error::AdvisorResult;
use crate::models::{CareHome, CostProjection, Scenario};
use crate::services::{compare_homes, project, ComparisonInsights, RankedHome};
use crate::storage::Catalogue;

/// Everything shown or exported for one calculation
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub generated_at: DateTime<Utc>,
    pub home: CareHome,
    pub projection: CostProjection,
    pub chart: ChartSeries,
    pub ranking: Vec<RankedHome>,
    pub insights: Option<ComparisonInsights>,
}

impl CostReport {
    /// Generate a report for the home named by `home_query`
    pub fn generate(
        catalogue: &Catalogue,
        home_query: &str,
        scenario: Scenario,
        years: f64,
        now: DateTime<Utc>,
    ) -> AdvisorResult<Self> {
        let home = catalogue.get(home_query)?.clone();
        Self::for_home(catalogue, home, scenario, years, now)
    }

    /// Generate a report for an already-selected home
    pub fn for_home(
        catalogue: &Catalogue,
        home: CareHome,
        scenario: Scenario,
        years: f64,
        now: DateTime<Utc>,
    ) -> AdvisorResult<Self> {
        let projection = project(&home, scenario, years)?;
        let chart = ChartSeries::from_projection(&projection);
        let ranking = compare_homes(catalogue.homes())?;
        let insights = ComparisonInsights::for_selection(&ranking, &home.key);

        Ok(Self {
            generated_at: now,
            home,
            projection,
            chart,
            ranking,
            insights,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Care Cost Projection\n");
        output.push_str(&double_separator(60));
        output.push('\n');
        output.push_str(&format_projection_summary(&self.projection, symbol));
        output.push('\n');
        output.push_str(&format_yearly_breakdown(&self.projection, &self.chart, symbol));

        if let Some(insights) = &self.insights {
            output.push('\n');
            output.push_str("Five-Year Comparison (Most Likely)\n");
            output.push_str(&format_ranking(&self.ranking, Some(&self.home.key), symbol));
            output.push('\n');
            output.push_str(&format_insights(insights, self.ranking.len(), symbol));
        }

        output
    }
}
