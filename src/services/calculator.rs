//! Calculator session
//!
//! Holds the calculator's current selection (home, scenario, duration) and a
//! bounded history of the calculations made, persisted in the key/value
//! store under `calculationHistory`.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::projection::project;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{CalculationRecord, CareHome, CostProjection, Scenario};
use crate::storage::{get_json, set_json, Catalogue, KeyValueStore};

/// Storage key of the calculation history
pub const HISTORY_KEY: &str = "calculationHistory";

/// Service for interactive cost calculations
pub struct CalculatorSession<'a, S: KeyValueStore + ?Sized> {
    catalogue: &'a Catalogue,
    store: &'a S,
    home: Option<&'a CareHome>,
    scenario: Scenario,
    years: f64,
    history_limit: usize,
}

impl<'a, S: KeyValueStore + ?Sized> CalculatorSession<'a, S> {
    pub fn new(
        catalogue: &'a Catalogue,
        store: &'a S,
        scenario: Scenario,
        years: f64,
        history_limit: usize,
    ) -> Self {
        Self {
            catalogue,
            store,
            home: None,
            scenario,
            years,
            history_limit,
        }
    }

    pub fn home(&self) -> Option<&CareHome> {
        self.home
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    /// Select a home by key or name and recalculate
    pub fn select_home(&mut self, query: &str, now: DateTime<Utc>) -> AdvisorResult<CostProjection> {
        let home = self.catalogue.get(query)?;
        self.home = Some(home);
        self.recalculate(now)?
            .ok_or_else(|| AdvisorError::home_not_found(query))
    }

    /// Change the scenario; recalculates when a home is selected
    pub fn select_scenario(
        &mut self,
        scenario: Scenario,
        now: DateTime<Utc>,
    ) -> AdvisorResult<Option<CostProjection>> {
        self.scenario = scenario;
        self.recalculate(now)
    }

    /// Change the duration; recalculates when a home is selected
    ///
    /// An invalid duration is rejected and the previous one kept.
    pub fn set_years(&mut self, years: f64, now: DateTime<Utc>) -> AdvisorResult<Option<CostProjection>> {
        let previous = self.years;
        self.years = years;
        match self.recalculate(now) {
            Err(e) => {
                self.years = previous;
                Err(e)
            }
            result => result,
        }
    }

    /// Project the current selection and record it
    ///
    /// Returns `None` until a home has been selected.
    pub fn recalculate(&mut self, now: DateTime<Utc>) -> AdvisorResult<Option<CostProjection>> {
        let Some(home) = self.home else {
            return Ok(None);
        };

        let projection = project(home, self.scenario, self.years)?;
        self.record(&projection, now);
        Ok(Some(projection))
    }

    /// Stored calculations, newest first
    pub fn history(&self) -> AdvisorResult<Vec<CalculationRecord>> {
        Ok(get_json(self.store, HISTORY_KEY)?.unwrap_or_default())
    }

    pub fn clear_history(&self) -> AdvisorResult<()> {
        self.store.remove(HISTORY_KEY)
    }

    // History is best effort: a failed write never fails the calculation.
    fn record(&self, projection: &CostProjection, now: DateTime<Utc>) {
        let mut history = match self.history() {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "discarding unreadable calculation history");
                Vec::new()
            }
        };

        history.insert(0, CalculationRecord::from_projection(projection, now));
        history.truncate(self.history_limit);

        match set_json(self.store, HISTORY_KEY, &history) {
            Ok(()) => debug!(entries = history.len(), "saved calculation history"),
            Err(e) => warn!(error = %e, "failed to save calculation history"),
        }
    }
}
