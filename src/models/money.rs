//! Money type for representing sterling amounts
//!
//! Internally stores amounts in pence (i64) so reference fees are exact.
//! Projections work in floating-point pounds and convert back with
//! [`Money::from_pounds_f64`] for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Represents a monetary amount stored as pence
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from pence
    ///
    /// # Examples
    /// ```
    /// use carehome_advisor::models::Money;
    /// let amount = Money::from_pence(1050); // £10.50
    /// ```
    pub const fn from_pence(pence: i64) -> Self {
        Self(pence)
    }

    /// Create a Money amount from whole pounds
    ///
    /// # Examples
    /// ```
    /// use carehome_advisor::models::Money;
    /// assert_eq!(Money::from_pounds(1200).pence(), 120_000);
    /// ```
    pub const fn from_pounds(pounds: i64) -> Self {
        Self(pounds * 100)
    }

    /// Create a Money amount from a floating-point pound value, rounded to the
    /// nearest penny
    pub fn from_pounds_f64(pounds: f64) -> Self {
        Self((pounds * 100.0).round() as i64)
    }

    /// Get the amount in pence
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Get the amount as floating-point pounds
    pub fn as_pounds_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Format with a currency symbol and thousands separators, e.g. "£1,200.00"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let pence = self.0.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(pence / 100),
            pence % 100
        )
    }

    /// Format rounded to whole pounds (half away from zero), e.g. "£62,400"
    pub fn format_whole(&self, symbol: &str) -> String {
        let pounds = (self.0 as f64 / 100.0).round() as i64;
        let sign = if pounds < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_thousands(pounds.unsigned_abs()))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("£"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self(self.0 * factor)
    }
}
