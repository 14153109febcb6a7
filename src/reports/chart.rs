//! Chart data
//!
//! The series behind the yearly cost chart, rounded to whole pounds.

use serde::{Deserialize, Serialize};

use crate::models::CostProjection;

/// Per-year series for a stacked cost chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// `Year 1`, `Year 2`, ...
    pub labels: Vec<String>,
    pub basic: Vec<i64>,
    pub additional: Vec<i64>,
    /// Running total, starting from the registration fee
    pub cumulative: Vec<i64>,
}

impl ChartSeries {
    pub fn from_projection(projection: &CostProjection) -> Self {
        let mut running = projection.registration_fee;
        let mut series = Self {
            labels: Vec::with_capacity(projection.yearly.len()),
            basic: Vec::with_capacity(projection.yearly.len()),
            additional: Vec::with_capacity(projection.yearly.len()),
            cumulative: Vec::with_capacity(projection.yearly.len()),
        };

        for year in &projection.yearly {
            running += year.total;
            series.labels.push(format!("Year {}", year.year));
            series.basic.push(year.basic_cost.round() as i64);
            series.additional.push(year.additional_cost.round() as i64);
            series.cumulative.push(running.round() as i64);
        }

        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest single-year stack, for scaling bars
    pub fn max_year_total(&self) -> i64 {
        self.basic
            .iter()
            .zip(&self.additional)
            .map(|(b, a)| b + a)
            .max()
            .unwrap_or(0)
    }
}
