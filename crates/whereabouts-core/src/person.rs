//! People — identity-keyed entities with a home location.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  location::{CiString, Location},
};

// ─── PersonId ────────────────────────────────────────────────────────────────

/// Opaque identifier assigned to a person at creation and stable for their
/// lifetime. This is the only key used across the in-memory calendar, the
/// command envelope, and persisted records.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
  pub fn random() -> Self { Self(Uuid::new_v4()) }
}

impl FromStr for PersonId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidPersonId(s.to_owned()))
  }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A person with a home location.
///
/// Equality and hashing compare `id` ONLY — two values with the same id are
/// the same person even if the other fields differ (e.g. one was
/// reconstructed from storage). This diverges from structural equality on
/// purpose: the id is the single key for every map and set in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:         PersonId,
  pub last_name:  CiString,
  pub first_name: CiString,
  pub home:       Location,
}

impl Person {
  /// Create a new person with a freshly assigned id.
  pub fn new(last_name: CiString, first_name: CiString, home: Location) -> Self {
    Self { id: PersonId::random(), last_name, first_name, home }
  }

  /// Reconstruct a person with a known id, e.g. when loading from storage.
  pub fn with_id(
    id: PersonId,
    last_name: CiString,
    first_name: CiString,
    home: Location,
  ) -> Self {
    Self { id, last_name, first_name, home }
  }

  /// Human-readable form, e.g. `Hilbers, Adriaan`.
  pub fn display_name(&self) -> String {
    format!("{}, {}", self.last_name.display_name(), self.first_name.display_name())
  }

  /// Sort key for name-ordered listings.
  pub fn name_key(&self) -> (&CiString, &CiString) {
    (&self.last_name, &self.first_name)
  }
}

impl PartialEq for Person {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Person {}

impl Hash for Person {
  fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::location::Country;

  fn home() -> Location {
    Location::new(Country::Netherlands, "Amsterdam").unwrap()
  }

  #[test]
  fn person_id_round_trips_through_string() {
    let id = PersonId::random();
    let parsed: PersonId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
  }

  #[test]
  fn person_id_rejects_garbage() {
    assert!(matches!(
      "not-a-uuid".parse::<PersonId>(),
      Err(Error::InvalidPersonId(_))
    ));
  }

  #[test]
  fn equality_is_by_id_only() {
    let person = Person::new(
      CiString::new("Hilbers").unwrap(),
      CiString::new("Adriaan").unwrap(),
      home(),
    );

    // Same id with different structural fields still compares equal. A
    // mismatch like this in live code means the caller rebuilt the person
    // incorrectly; equality deliberately does not catch it.
    let renamed = Person::with_id(
      person.id,
      CiString::new("Somebody").unwrap(),
      CiString::new("Else").unwrap(),
      home(),
    );
    assert_eq!(person, renamed);

    // A distinct id is a distinct person, fields notwithstanding.
    let twin = Person::new(
      person.last_name.clone(),
      person.first_name.clone(),
      home(),
    );
    assert_ne!(person, twin);
  }

  #[test]
  fn display_name_is_last_comma_first() {
    let person = Person::new(
      CiString::new("hilbers").unwrap(),
      CiString::new("adriaan").unwrap(),
      home(),
    );
    assert_eq!(person.display_name(), "Hilbers, Adriaan");
  }
}
