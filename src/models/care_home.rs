//! Care home reference data
//!
//! Each care home is an immutable pricing record: a weekly fee, one-off
//! registration fee, refundable deposit (in weeks of fees) and three monthly
//! extras. The built-in catalogue holds the five Birmingham homes the
//! calculator compares.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// CQC inspection rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CqcRating {
    Outstanding,
    Good,
    RequiresImprovement,
    Inadequate,
}

impl CqcRating {
    /// Parse a rating from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "outstanding" => Some(Self::Outstanding),
            "good" => Some(Self::Good),
            "requires_improvement" => Some(Self::RequiresImprovement),
            "inadequate" => Some(Self::Inadequate),
            _ => None,
        }
    }
}

impl fmt::Display for CqcRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outstanding => write!(f, "Outstanding"),
            Self::Good => write!(f, "Good"),
            Self::RequiresImprovement => write!(f, "Requires Improvement"),
            Self::Inadequate => write!(f, "Inadequate"),
        }
    }
}

/// A care home and its published fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareHome {
    /// Stable lookup key, e.g. `manor_house`
    pub key: String,

    /// Display name
    pub name: String,

    /// Basic weekly fee
    pub weekly_fee: Money,

    /// One-off registration fee, paid up front
    pub registration_fee: Money,

    /// Refundable deposit, expressed in weeks of the weekly fee
    pub deposit_weeks: u32,

    /// Monthly activities charge
    pub activities: Money,

    /// Monthly medical charge
    pub medical: Money,

    /// Monthly transport charge
    pub transport: Money,

    /// Area of the city
    #[serde(default)]
    pub location: String,

    /// Latest CQC rating
    pub cqc_rating: CqcRating,

    /// Care specialties offered
    #[serde(default)]
    pub specialties: Vec<String>,

    /// Date of the last CQC inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_inspection: Option<NaiveDate>,
}

impl CareHome {
    /// Refundable deposit amount
    pub fn deposit(&self) -> Money {
        self.weekly_fee * i64::from(self.deposit_weeks)
    }

    /// Sum of the monthly extras
    pub fn monthly_extras(&self) -> Money {
        self.activities + self.medical + self.transport
    }

    /// Basic annual fee before inflation (52 weeks)
    pub fn annual_base(&self) -> Money {
        self.weekly_fee * 52
    }

    /// Check whether `query` names this home (by key or case-insensitive name)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.key.eq_ignore_ascii_case(query) || self.name.eq_ignore_ascii_case(query)
    }

    /// Validate the home's reference data
    pub fn validate(&self) -> Result<(), CareHomeValidationError> {
        if self.key.trim().is_empty() {
            return Err(CareHomeValidationError::EmptyKey);
        }

        if self.name.trim().is_empty() {
            return Err(CareHomeValidationError::EmptyName);
        }

        let fees = [
            ("weekly_fee", self.weekly_fee),
            ("registration_fee", self.registration_fee),
            ("activities", self.activities),
            ("medical", self.medical),
            ("transport", self.transport),
        ];
        for (field, amount) in fees {
            if amount.is_negative() {
                return Err(CareHomeValidationError::NegativeFee(field));
            }
        }

        Ok(())
    }
}

impl fmt::Display for CareHome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.location)
    }
}

/// Validation errors for care homes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareHomeValidationError {
    EmptyKey,
    EmptyName,
    NegativeFee(&'static str),
}

impl fmt::Display for CareHomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "Care home key cannot be empty"),
            Self::EmptyName => write!(f, "Care home name cannot be empty"),
            Self::NegativeFee(field) => write!(f, "Care home {} cannot be negative", field),
        }
    }
}

impl std::error::Error for CareHomeValidationError {}

#[allow(clippy::too_many_arguments)]
fn home(
    key: &str,
    name: &str,
    weekly: i64,
    registration: i64,
    deposit_weeks: u32,
    extras: (i64, i64, i64),
    location: &str,
    cqc_rating: CqcRating,
    specialties: &[&str],
    last_inspection: (i32, u32, u32),
) -> CareHome {
    CareHome {
        key: key.to_string(),
        name: name.to_string(),
        weekly_fee: Money::from_pounds(weekly),
        registration_fee: Money::from_pounds(registration),
        deposit_weeks,
        activities: Money::from_pounds(extras.0),
        medical: Money::from_pounds(extras.1),
        transport: Money::from_pounds(extras.2),
        location: location.to_string(),
        cqc_rating,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        last_inspection: NaiveDate::from_ymd_opt(last_inspection.0, last_inspection.1, last_inspection.2),
    }
}

/// The built-in catalogue of Birmingham care homes, in display order
pub fn default_catalogue() -> Vec<CareHome> {
    vec![
        home(
            "manor_house",
            "Manor House Care Home",
            1200,
            500,
            6,
            (60, 180, 80),
            "Edgbaston",
            CqcRating::Good,
            &["Dementia Care", "Diabetes Management"],
            (2024, 3, 15),
        ),
        home(
            "digby_manor",
            "Digby Manor Care Home",
            1050,
            400,
            4,
            (45, 160, 70),
            "Birmingham Central",
            CqcRating::Good,
            &["General Care", "Mobility Support"],
            (2024, 1, 20),
        ),
        home(
            "bishops_manor",
            "Bishops Manor Care Home",
            1150,
            450,
            5,
            (50, 170, 75),
            "Selly Oak",
            CqcRating::Outstanding,
            &["Dementia Care", "End of Life Care"],
            (2024, 2, 10),
        ),
        home(
            "edgbaston_manor",
            "Edgbaston Manor Care Home",
            1299,
            600,
            6,
            (70, 200, 60),
            "Edgbaston",
            CqcRating::Outstanding,
            &["Premium Care", "Rehabilitation"],
            (2024, 4, 5),
        ),
        home(
            "metchley_manor",
            "Metchley Manor Care Home",
            1099,
            350,
            5,
            (40, 150, 85),
            "Harborne",
            CqcRating::Good,
            &["Budget Friendly", "Social Care"],
            (2024, 1, 30),
        ),
    ]
}
