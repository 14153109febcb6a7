//! Cost projection
//!
//! Projects the cost of a stay in one care home, year by year, under an
//! inflation scenario. Fees compound annually from the second year; the
//! scenario multiplier applies to the monthly extras only. A fractional stay
//! produces a trailing partial year scaled by the remainder.

use tracing::debug;

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{AdditionalBreakdown, CareHome, CostProjection, Scenario, YearlyBreakdown};

/// Longest stay accepted by [`project`]
pub const MAX_YEARS: f64 = 50.0;

/// Weeks charged per year
const WEEKS_PER_YEAR: f64 = 52.0;

/// Months charged per year
const MONTHS_PER_YEAR: f64 = 12.0;

/// Project the cost of staying `years` years in `home` under `scenario`
///
/// # Errors
///
/// Returns a validation error when `years` is not a positive finite number
/// no greater than [`MAX_YEARS`], or when the home has negative fees.
pub fn project(home: &CareHome, scenario: Scenario, years: f64) -> AdvisorResult<CostProjection> {
    if !years.is_finite() || years <= 0.0 {
        return Err(AdvisorError::Validation(format!(
            "Duration must be a positive number of years, got {}",
            years
        )));
    }
    if years > MAX_YEARS {
        return Err(AdvisorError::Validation(format!(
            "Duration cannot exceed {} years, got {}",
            MAX_YEARS, years
        )));
    }
    home.validate()
        .map_err(|e| AdvisorError::Validation(e.to_string()))?;

    let config = scenario.config();
    let weekly_fee = home.weekly_fee.as_pounds_f64();
    let annual_base = weekly_fee * WEEKS_PER_YEAR;
    let registration_fee = home.registration_fee.as_pounds_f64();
    let annual_activities = home.activities.as_pounds_f64() * MONTHS_PER_YEAR;
    let annual_medical = home.medical.as_pounds_f64() * MONTHS_PER_YEAR;
    let annual_transport = home.transport.as_pounds_f64() * MONTHS_PER_YEAR;

    let last_year = years.ceil() as u32;
    let remainder = years.fract();

    let mut yearly = Vec::with_capacity(last_year as usize);
    let mut breakdown = AdditionalBreakdown::default();
    let mut total_basic = 0.0;
    let mut total_additional = 0.0;
    let mut total_projected = registration_fee;

    for year in 1..=last_year {
        let multiplier = (1.0 + config.inflation_rate).powi(year as i32 - 1);
        let year_fraction = if f64::from(year) <= years || remainder == 0.0 {
            1.0
        } else {
            remainder
        };

        let scale = multiplier * year_fraction;
        let extras_scale = scale * config.cost_multiplier;

        let activities = annual_activities * extras_scale;
        let medical = annual_medical * extras_scale;
        let transport = annual_transport * extras_scale;

        let basic_cost = annual_base * scale;
        let additional_cost = activities + medical + transport;
        let total = basic_cost + additional_cost;

        breakdown.activities += activities;
        breakdown.medical += medical;
        breakdown.transport += transport;
        total_basic += basic_cost;
        total_additional += additional_cost;
        total_projected += total;

        yearly.push(YearlyBreakdown {
            year,
            basic_cost,
            additional_cost,
            total,
            inflation_pct: (multiplier - 1.0) * 100.0,
            year_fraction,
        });
    }

    debug!(
        home = %home.key,
        scenario = %scenario,
        years,
        total = total_projected,
        "projected care costs"
    );

    Ok(CostProjection {
        home_key: home.key.clone(),
        home_name: home.name.clone(),
        scenario,
        years,
        weekly_fee,
        annual_base,
        registration_fee,
        deposit: home.deposit().as_pounds_f64(),
        yearly,
        total_basic,
        total_additional,
        additional_breakdown: breakdown,
        total_projected,
    })
}
