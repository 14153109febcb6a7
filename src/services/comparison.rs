//! Comparison ranking
//!
//! Ranks every home in a catalogue by its five-year realistic cost, and
//! derives the headline comparisons shown next to a selected home.

use serde::Serialize;

use super::projection::project;
use crate::error::AdvisorResult;
use crate::models::{CareHome, CqcRating, Scenario};

/// Horizon of the comparison, in years
pub const COMPARISON_YEARS: f64 = 5.0;

/// London fees relative to the catalogue's region
pub const LONDON_MULTIPLIER: f64 = 1.35;

/// One row of the ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHome {
    /// 1-based position, cheapest first
    pub rank: usize,
    pub key: String,
    pub name: String,
    pub location: String,
    pub cqc_rating: CqcRating,
    pub weekly_fee: f64,
    /// Five-year realistic total
    pub total: f64,
    pub monthly_average: f64,
    pub london_equivalent: f64,
    pub london_savings: f64,
}

/// Rank `homes` by five-year realistic total, cheapest first
///
/// Ties keep their input order.
pub fn compare_homes(homes: &[CareHome]) -> AdvisorResult<Vec<RankedHome>> {
    let mut rows = homes
        .iter()
        .map(|home| {
            let projection = project(home, Scenario::Realistic, COMPARISON_YEARS)?;
            let total = projection.total_projected;
            let london_equivalent = total * LONDON_MULTIPLIER;
            Ok(RankedHome {
                rank: 0,
                key: home.key.clone(),
                name: home.name.clone(),
                location: home.location.clone(),
                cqc_rating: home.cqc_rating,
                weekly_fee: projection.weekly_fee,
                total,
                monthly_average: total / (COMPARISON_YEARS * 12.0),
                london_equivalent,
                london_savings: london_equivalent - total,
            })
        })
        .collect::<AdvisorResult<Vec<_>>>()?;

    rows.sort_by(|a, b| a.total.total_cmp(&b.total));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    Ok(rows)
}

/// How a selected home compares with the rest of the ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonInsights {
    pub key: String,
    pub rank: usize,
    pub is_cheapest: bool,
    pub is_most_expensive: bool,
    /// Extra paid over the cheapest home (zero when it is the cheapest)
    pub extra_vs_cheapest: f64,
    /// Saved against the most expensive home
    pub saving_vs_most_expensive: f64,
    pub saving_pct_vs_most_expensive: f64,
    /// Positive when above the average total
    pub difference_vs_average: f64,
}

impl ComparisonInsights {
    /// Insights for the home `key`, or `None` if it is not ranked
    pub fn for_selection(ranked: &[RankedHome], key: &str) -> Option<Self> {
        let selected = ranked.iter().find(|row| row.key == key)?;
        let cheapest = ranked.first()?;
        let most_expensive = ranked.last()?;
        let average = ranked.iter().map(|row| row.total).sum::<f64>() / ranked.len() as f64;

        let saving_vs_most_expensive = most_expensive.total - selected.total;
        let saving_pct_vs_most_expensive = if most_expensive.total > 0.0 {
            saving_vs_most_expensive / most_expensive.total * 100.0
        } else {
            0.0
        };

        Some(Self {
            key: selected.key.clone(),
            rank: selected.rank,
            is_cheapest: selected.rank == 1,
            is_most_expensive: selected.rank == ranked.len(),
            extra_vs_cheapest: selected.total - cheapest.total,
            saving_vs_most_expensive,
            saving_pct_vs_most_expensive,
            difference_vs_average: selected.total - average,
        })
    }
}
