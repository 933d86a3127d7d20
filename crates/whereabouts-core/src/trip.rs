//! Trips and the per-day location pairs they induce.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Error, Result, location::Location};

// ─── Trip ────────────────────────────────────────────────────────────────────

/// A contiguous span away from home: destination plus inclusive date bounds.
/// The constructor enforces `start_date < end_date` strictly, so every trip
/// spans at least one night away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Trip {
  destination: Location,
  start_date:  NaiveDate,
  end_date:    NaiveDate,
}

impl Trip {
  pub fn new(
    destination: Location,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<Self> {
    if start_date >= end_date {
      return Err(Error::TripDates { start: start_date, end: end_date });
    }
    Ok(Self { destination, start_date, end_date })
  }

  pub fn destination(&self) -> &Location { &self.destination }

  pub fn start_date(&self) -> NaiveDate { self.start_date }

  pub fn end_date(&self) -> NaiveDate { self.end_date }
}

impl fmt::Display for Trip {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}..{}", self.destination, self.start_date, self.end_date)
  }
}

// ─── DayLocation ─────────────────────────────────────────────────────────────

/// Where a person is at the beginning and at the end of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLocation {
  pub start: Location,
  pub end:   Location,
}

impl DayLocation {
  /// A day spent entirely in one place.
  pub fn stationary(at: Location) -> Self {
    Self { start: at.clone(), end: at }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::location::Country;

  fn zurich() -> Location {
    Location::new(Country::Switzerland, "Zurich").unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn trip_must_span_at_least_one_day() {
    assert!(Trip::new(zurich(), date(2024, 6, 23), date(2024, 6, 24)).is_ok());
    assert!(matches!(
      Trip::new(zurich(), date(2024, 6, 23), date(2024, 6, 23)),
      Err(Error::TripDates { .. })
    ));
    assert!(matches!(
      Trip::new(zurich(), date(2024, 6, 24), date(2024, 6, 23)),
      Err(Error::TripDates { .. })
    ));
  }
}
