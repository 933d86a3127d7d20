//! The persistence seam consumed by the coordinator.
//!
//! The trait is implemented by storage backends (e.g.
//! `whereabouts-store-sqlite`). The coordinator depends on this abstraction,
//! not on any concrete backend, and works without one entirely.

use std::convert::Infallible;

use crate::{person::Person, trip::Trip};

/// Abstraction over a durable record of people and their trips.
///
/// Synchronous by design: the core runs single-threaded with no internal
/// async I/O, and store calls are expected to fail fast. Implementations
/// must signal distinguishable failures (duplicate insert, removal of a
/// missing record) rather than swallow them; the coordinator translates
/// those into its own error taxonomy.
pub trait ItineraryStore {
  type Error: std::error::Error + Send + Sync + 'static;

  fn add_person(&self, person: &Person) -> Result<(), Self::Error>;

  fn get_all_people(&self) -> Result<Vec<Person>, Self::Error>;

  fn remove_person(&self, person: &Person) -> Result<(), Self::Error>;

  fn add_trip(&self, person: &Person, trip: &Trip) -> Result<(), Self::Error>;

  fn get_trips_for_person(&self, person: &Person)
  -> Result<Vec<Trip>, Self::Error>;

  fn remove_trip(&self, person: &Person, trip: &Trip)
  -> Result<(), Self::Error>;
}

/// Backend stand-in for calendars that run purely in memory. Uninhabited:
/// it only anchors the default type parameter of
/// [`GroupCalendar`](crate::calendar::GroupCalendar) and is never called.
#[derive(Debug, Clone, Copy)]
pub enum NoPersistence {}

impl ItineraryStore for NoPersistence {
  type Error = Infallible;

  fn add_person(&self, _: &Person) -> Result<(), Infallible> { match *self {} }

  fn get_all_people(&self) -> Result<Vec<Person>, Infallible> {
    match *self {}
  }

  fn remove_person(&self, _: &Person) -> Result<(), Infallible> {
    match *self {}
  }

  fn add_trip(&self, _: &Person, _: &Trip) -> Result<(), Infallible> {
    match *self {}
  }

  fn get_trips_for_person(&self, _: &Person) -> Result<Vec<Trip>, Infallible> {
    match *self {}
  }

  fn remove_trip(&self, _: &Person, _: &Trip) -> Result<(), Infallible> {
    match *self {}
  }
}
