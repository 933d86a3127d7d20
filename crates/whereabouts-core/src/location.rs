//! Locations — a country plus a case-insensitive city identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Country ─────────────────────────────────────────────────────────────────

/// The closed set of countries the system knows about.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
  Austria,
  Netherlands,
  Norway,
  Switzerland,
  UnitedKingdom,
  UnitedStates,
}

impl Country {
  /// The canonical wire/storage token, e.g. `UNITED_KINGDOM`.
  pub fn token(&self) -> &'static str {
    match self {
      Self::Austria => "AUSTRIA",
      Self::Netherlands => "NETHERLANDS",
      Self::Norway => "NORWAY",
      Self::Switzerland => "SWITZERLAND",
      Self::UnitedKingdom => "UNITED_KINGDOM",
      Self::UnitedStates => "UNITED_STATES",
    }
  }

  /// Human-readable form, e.g. `United Kingdom`.
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Austria => "Austria",
      Self::Netherlands => "Netherlands",
      Self::Norway => "Norway",
      Self::Switzerland => "Switzerland",
      Self::UnitedKingdom => "United Kingdom",
      Self::UnitedStates => "United States",
    }
  }
}

impl FromStr for Country {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_uppercase().as_str() {
      "AUSTRIA" => Ok(Self::Austria),
      "NETHERLANDS" => Ok(Self::Netherlands),
      "NORWAY" => Ok(Self::Norway),
      "SWITZERLAND" => Ok(Self::Switzerland),
      "UNITED_KINGDOM" => Ok(Self::UnitedKingdom),
      "UNITED_STATES" => Ok(Self::UnitedStates),
      _ => Err(Error::UnknownCountry(s.to_owned())),
    }
  }
}

impl fmt::Display for Country {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}

// ─── CiString ────────────────────────────────────────────────────────────────

/// A case-insensitive identifier: folded to lowercase at construction, never
/// empty. Equality, ordering, and hashing all operate on the folded form;
/// [`CiString::display_name`] re-cases for presentation.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CiString(String);

impl CiString {
  pub fn new(raw: impl AsRef<str>) -> Result<Self> {
    let folded = raw.as_ref().to_lowercase();
    if folded.is_empty() {
      return Err(Error::EmptyIdentifier);
    }
    Ok(Self(folded))
  }

  /// The folded form used for comparison and storage.
  pub fn as_str(&self) -> &str { &self.0 }

  /// Title-cased form for presentation, e.g. `sankt-anton` → `Sankt-Anton`.
  pub fn display_name(&self) -> String {
    let mut out = String::with_capacity(self.0.len());
    let mut word_start = true;
    for c in self.0.chars() {
      if c.is_alphabetic() {
        if word_start {
          out.extend(c.to_uppercase());
        } else {
          out.push(c);
        }
        word_start = false;
      } else {
        out.push(c);
        word_start = true;
      }
    }
    out
  }
}

impl TryFrom<String> for CiString {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::new(raw) }
}

impl From<CiString> for String {
  fn from(s: CiString) -> Self { s.0 }
}

impl fmt::Display for CiString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// An immutable place: country plus city. Two locations are equal iff the
/// country and the folded city match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
  pub country: Country,
  pub city:    CiString,
}

impl Location {
  pub fn new(country: Country, city: impl AsRef<str>) -> Result<Self> {
    Ok(Self { country, city: CiString::new(city)? })
  }

  /// Human-readable form, e.g. `Zurich, Switzerland`.
  pub fn display_name(&self) -> String {
    format!("{}, {}", self.city.display_name(), self.country.display_name())
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.country.token(), self.city)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ci_string_folds_case_for_equality() {
    let a = CiString::new("Amsterdam").unwrap();
    let b = CiString::new("AMSTERDAM").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "amsterdam");
  }

  #[test]
  fn ci_string_rejects_empty() {
    assert!(matches!(CiString::new(""), Err(Error::EmptyIdentifier)));
  }

  #[test]
  fn ci_string_display_name_recapitalises() {
    assert_eq!(CiString::new("sankt-anton").unwrap().display_name(), "Sankt-Anton");
    assert_eq!(CiString::new("new york").unwrap().display_name(), "New York");
  }

  #[test]
  fn country_parses_wire_token() {
    assert_eq!("UNITED_KINGDOM".parse::<Country>().unwrap(), Country::UnitedKingdom);
    assert_eq!("netherlands".parse::<Country>().unwrap(), Country::Netherlands);
    assert!("ATLANTIS".parse::<Country>().is_err());
  }

  #[test]
  fn locations_compare_case_insensitively() {
    let a = Location::new(Country::Switzerland, "Zurich").unwrap();
    let b = Location::new(Country::Switzerland, "zurich").unwrap();
    let c = Location::new(Country::Austria, "zurich").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.display_name(), "Zurich, Switzerland");
  }
}
