//! Projection result types
//!
//! Derived values, never stored as reference data. Amounts are floating-point
//! pounds; display code rounds them through `Money`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scenario::Scenario;

/// One year's split of basic vs additional cost within a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdown {
    /// 1-based year number
    pub year: u32,
    /// Weekly fees for the year, inflated and scaled by `year_fraction`
    pub basic_cost: f64,
    /// Monthly extras for the year, inflated, scaled and scenario-adjusted
    pub additional_cost: f64,
    /// `basic_cost + additional_cost`
    pub total: f64,
    /// Cumulative inflation applied this year, in percent
    pub inflation_pct: f64,
    /// Portion of the year covered (1.0 except for a trailing partial year)
    pub year_fraction: f64,
}

/// Additional costs itemised over the whole projection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditionalBreakdown {
    pub activities: f64,
    pub medical: f64,
    pub transport: f64,
}

impl AdditionalBreakdown {
    pub fn total(&self) -> f64 {
        self.activities + self.medical + self.transport
    }
}

/// Full cost projection for one home under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostProjection {
    pub home_key: String,
    pub home_name: String,
    pub scenario: Scenario,
    /// Requested stay in years (may be fractional)
    pub years: f64,
    pub weekly_fee: f64,
    /// Weekly fee × 52, before inflation
    pub annual_base: f64,
    pub registration_fee: f64,
    pub deposit: f64,
    pub yearly: Vec<YearlyBreakdown>,
    pub total_basic: f64,
    pub total_additional: f64,
    pub additional_breakdown: AdditionalBreakdown,
    /// Registration fee plus every year's total
    pub total_projected: f64,
}

impl CostProjection {
    /// Average monthly cost across the stay, registration included
    pub fn monthly_average(&self) -> f64 {
        self.total_projected / (self.years * 12.0)
    }
}

/// A calculation kept in the bounded history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub timestamp: DateTime<Utc>,
    pub home_key: String,
    pub scenario: Scenario,
    pub years: f64,
    pub weekly_fee: f64,
    pub annual_base: f64,
    pub total_cost: f64,
}

impl CalculationRecord {
    /// Summarise a projection made at `timestamp`
    pub fn from_projection(projection: &CostProjection, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            home_key: projection.home_key.clone(),
            scenario: projection.scenario,
            years: projection.years,
            weekly_fee: projection.weekly_fee,
            annual_base: projection.annual_base,
            total_cost: projection.total_projected,
        }
    }
}
