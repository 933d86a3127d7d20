//! [`SqliteStore`] — the SQLite implementation of [`ItineraryStore`].

use std::path::Path;

use rusqlite::ErrorCode;
use whereabouts_core::{person::Person, store::ItineraryStore, trip::Trip};

use crate::{
  Error, Result,
  encode::{RawPerson, RawTrip, encode_date},
  schema::SCHEMA,
};

/// An itinerary store backed by a single SQLite file.
pub struct SqliteStore {
  conn: rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(rusqlite::Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(rusqlite::Connection::open_in_memory()?)
  }

  fn init(conn: rusqlite::Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == ErrorCode::ConstraintViolation
  )
}

impl ItineraryStore for SqliteStore {
  type Error = Error;

  fn add_person(&self, person: &Person) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO person (id, last_name, first_name, country, city)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
          person.id.to_string(),
          person.last_name.as_str(),
          person.first_name.as_str(),
          person.home.country.token(),
          person.home.city.as_str(),
        ],
      )
      .map_err(|err| {
        if is_constraint_violation(&err) {
          Error::DuplicatePerson(person.id)
        } else {
          Error::Database(err)
        }
      })?;
    Ok(())
  }

  fn get_all_people(&self) -> Result<Vec<Person>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, last_name, first_name, country, city FROM person",
    )?;
    let raws = stmt
      .query_map([], |row| {
        Ok(RawPerson {
          id:         row.get(0)?,
          last_name:  row.get(1)?,
          first_name: row.get(2)?,
          country:    row.get(3)?,
          city:       row.get(4)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  fn remove_person(&self, person: &Person) -> Result<()> {
    // Trips cascade with the person row.
    let removed = self.conn.execute(
      "DELETE FROM person WHERE id = ?1",
      rusqlite::params![person.id.to_string()],
    )?;
    if removed == 0 {
      return Err(Error::PersonNotFound(person.id));
    }
    Ok(())
  }

  fn add_trip(&self, person: &Person, trip: &Trip) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO trip (person_id, country, city, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
          person.id.to_string(),
          trip.destination().country.token(),
          trip.destination().city.as_str(),
          encode_date(trip.start_date()),
          encode_date(trip.end_date()),
        ],
      )
      .map_err(|err| {
        if is_constraint_violation(&err) {
          Error::TripRejected(person.id)
        } else {
          Error::Database(err)
        }
      })?;
    Ok(())
  }

  fn get_trips_for_person(&self, person: &Person) -> Result<Vec<Trip>> {
    let mut stmt = self.conn.prepare(
      "SELECT country, city, start_date, end_date FROM trip
       WHERE person_id = ?1
       ORDER BY start_date, end_date",
    )?;
    let raws = stmt
      .query_map(rusqlite::params![person.id.to_string()], |row| {
        Ok(RawTrip {
          country:    row.get(0)?,
          city:       row.get(1)?,
          start_date: row.get(2)?,
          end_date:   row.get(3)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    raws.into_iter().map(RawTrip::into_trip).collect()
  }

  fn remove_trip(&self, person: &Person, trip: &Trip) -> Result<()> {
    let removed = self.conn.execute(
      "DELETE FROM trip
       WHERE person_id = ?1 AND country = ?2 AND city = ?3
         AND start_date = ?4 AND end_date = ?5",
      rusqlite::params![
        person.id.to_string(),
        trip.destination().country.token(),
        trip.destination().city.as_str(),
        encode_date(trip.start_date()),
        encode_date(trip.end_date()),
      ],
    )?;
    if removed == 0 {
      return Err(Error::TripNotFound);
    }
    Ok(())
  }
}
