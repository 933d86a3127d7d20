//! Error types for `whereabouts-core`.
//!
//! One enum covers the whole taxonomy: malformed requests, business-rule
//! violations, and persistence failures. The command dispatch boundary
//! converts every variant into a 400 [`Response`](crate::command::Response);
//! anything that is not an `Error` is a programming defect and propagates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  // ── Malformed requests ────────────────────────────────────────────────

  #[error("request is missing required field `{0}`")]
  MissingField(&'static str),

  #[error("unknown command: `{0}`")]
  UnknownCommand(String),

  #[error("cannot parse `{0}` as a date (expected YYYY-MM-DD)")]
  InvalidDate(String),

  #[error("unknown country: `{0}`")]
  UnknownCountry(String),

  #[error("cannot parse `{0}` as a person id")]
  InvalidPersonId(String),

  // ── Business rules ────────────────────────────────────────────────────

  #[error("identifier must not be empty")]
  EmptyIdentifier,

  #[error("trip must start before it ends: {start} is not before {end}")]
  TripDates { start: NaiveDate, end: NaiveDate },

  #[error("candidate trip has same start date as existing trip ({date})")]
  StartDateCollision { date: NaiveDate },

  #[error("candidate trip has same end date as existing trip ({date})")]
  EndDateCollision { date: NaiveDate },

  #[error(
    "candidate trip {start}..{end} partially overlaps existing trip \
     {existing_start}..{existing_end}"
  )]
  PartialOverlap {
    start:          NaiveDate,
    end:            NaiveDate,
    existing_start: NaiveDate,
    existing_end:   NaiveDate,
  },

  #[error("person {0} is already in the calendar")]
  DuplicatePerson(PersonId),

  #[error("person id not found: {0}")]
  UnknownPerson(PersonId),

  #[error("no trip spanning {start}..{end} on this itinerary")]
  UnknownTrip { start: NaiveDate, end: NaiveDate },

  #[error("display range must be ascending: {start} is after {end}")]
  InvalidRange { start: NaiveDate, end: NaiveDate },

  #[error("display range is not set")]
  DisplayRangeNotSet,

  #[error("{date} is outside the display range {start}..{end}")]
  OutsideDisplayRange {
    date:  NaiveDate,
    start: NaiveDate,
    end:   NaiveDate,
  },

  // ── Persistence ───────────────────────────────────────────────────────

  #[error("persistence failure: {0}")]
  Persistence(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
