//! The command envelope crossing the web boundary.
//!
//! The front end submits a flat string-keyed map; [`Command::parse`] turns
//! it into a typed operation exactly once, so business logic never
//! re-validates primitive shapes. Every dispatch produces a [`Response`].

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Error, Result,
  location::{CiString, Location},
  person::PersonId,
  trip::Trip,
};

/// Envelope key naming the requested operation.
pub const COMMAND_KEY: &str = "command";

// ─── Command ─────────────────────────────────────────────────────────────────

/// A fully parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  AddPerson {
    /// Normally absent (the id is assigned at creation); suppliable for
    /// rehydration flows that must pin a known id.
    person_id:  Option<PersonId>,
    last_name:  CiString,
    first_name: CiString,
    home:       Location,
  },
  RemovePerson {
    person_id: PersonId,
  },
  AddTrip {
    person_id: PersonId,
    trip:      Trip,
  },
  SetDisplayRange {
    start: NaiveDate,
    end:   NaiveDate,
  },
}

impl Command {
  /// Parse the flat string map collected by the front end.
  pub fn parse(raw: &HashMap<String, String>) -> Result<Self> {
    let kind = raw
      .get(COMMAND_KEY)
      .ok_or(Error::MissingField(COMMAND_KEY))?;
    match kind.as_str() {
      "ADD_PERSON" => Ok(Self::AddPerson {
        person_id:  raw
          .get("person_id")
          .map(|s| s.parse::<PersonId>())
          .transpose()?,
        last_name:  CiString::new(field(raw, "last_name")?)?,
        first_name: CiString::new(field(raw, "first_name")?)?,
        home:       location(raw)?,
      }),
      "REMOVE_PERSON" => Ok(Self::RemovePerson {
        person_id: field(raw, "person_id")?.parse()?,
      }),
      "ADD_TRIP" => Ok(Self::AddTrip {
        person_id: field(raw, "person_id")?.parse()?,
        trip:      Trip::new(
          location(raw)?,
          date(field(raw, "start_date")?)?,
          date(field(raw, "end_date")?)?,
        )?,
      }),
      "SET_DISPLAY_RANGE" => Ok(Self::SetDisplayRange {
        start: date(field(raw, "start_date")?)?,
        end:   date(field(raw, "end_date")?)?,
      }),
      other => Err(Error::UnknownCommand(other.to_owned())),
    }
  }
}

fn field<'a>(
  raw: &'a HashMap<String, String>,
  key: &'static str,
) -> Result<&'a str> {
  raw.get(key).map(String::as_str).ok_or(Error::MissingField(key))
}

fn location(raw: &HashMap<String, String>) -> Result<Location> {
  Location::new(field(raw, "country")?.parse()?, field(raw, "city")?)
}

fn date(value: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(value.to_owned()))
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Outcome of a dispatched command: 200 with a confirmation, or 400 with a
/// description of the violated rule. The web layer always has something
/// renderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
  pub code:    u16,
  pub message: String,
}

impl Response {
  pub fn ok(message: impl Into<String>) -> Self {
    Self { code: 200, message: message.into() }
  }

  pub fn rejected(error: &Error) -> Self {
    Self { code: 400, message: error.to_string() }
  }

  pub fn is_success(&self) -> bool { self.code == 200 }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
