//! Error type for `whereabouts-store-sqlite`.

use thiserror::Error;
use whereabouts_core::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] whereabouts_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// An insert hit the primary-key constraint on `person.id`.
  #[error("person {0} is already stored")]
  DuplicatePerson(PersonId),

  #[error("person {0} not found in storage")]
  PersonNotFound(PersonId),

  /// A trip insert violated a storage constraint: the person row is
  /// missing, or the dates collide with an already-stored trip.
  #[error("trip for person {0} rejected by storage constraints")]
  TripRejected(PersonId),

  #[error("trip not found in storage")]
  TripNotFound,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
