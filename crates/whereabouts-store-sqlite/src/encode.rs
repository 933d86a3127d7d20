//! Row ↔ domain conversions for the SQLite store.

use chrono::NaiveDate;
use whereabouts_core::{
  location::{CiString, Location},
  person::Person,
  trip::Trip,
};

use crate::{Error, Result};

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map_err(|_| Error::DateParse(raw.to_owned()))
}

/// A `person` row as raw TEXT columns.
pub struct RawPerson {
  pub id:         String,
  pub last_name:  String,
  pub first_name: String,
  pub country:    String,
  pub city:       String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person::with_id(
      self.id.parse()?,
      CiString::new(&self.last_name)?,
      CiString::new(&self.first_name)?,
      Location::new(self.country.parse()?, &self.city)?,
    ))
  }
}

/// A `trip` row as raw TEXT columns.
pub struct RawTrip {
  pub country:    String,
  pub city:       String,
  pub start_date: String,
  pub end_date:   String,
}

impl RawTrip {
  pub fn into_trip(self) -> Result<Trip> {
    Ok(Trip::new(
      Location::new(self.country.parse()?, &self.city)?,
      decode_date(&self.start_date)?,
      decode_date(&self.end_date)?,
    )?)
  }
}
