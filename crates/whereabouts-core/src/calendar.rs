//! The multi-person calendar coordinator.
//!
//! Owns one [`Itinerary`] per person, dispatches command envelopes, and
//! maintains the cached "who is where when" display table for a configured
//! date range. Holds mutable, uncoordinated state: deployments serving
//! concurrent callers must serialize access to an instance externally.

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Error, Result,
  command::{Command, Response},
  itinerary::Itinerary,
  location::Location,
  person::{Person, PersonId},
  store::{ItineraryStore, NoPersistence},
  trip::{DayLocation, Trip},
};

// ─── Display table ───────────────────────────────────────────────────────────

/// One person's location pair for one date.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDay {
  pub person: Person,
  pub day:    DayLocation,
}

/// One date's entries, person-minor in name-sorted order.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
  pub date:    NaiveDate,
  pub entries: Vec<PersonDay>,
}

/// The date-major grid of everyone's whereabouts over the configured range.
/// Empty until both ends of the range are set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayTable {
  pub start: Option<NaiveDate>,
  pub end:   Option<NaiveDate>,
  pub rows:  Vec<DisplayRow>,
}

impl DisplayTable {
  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  fn row(&self, date: NaiveDate) -> Option<&DisplayRow> {
    self.rows.iter().find(|row| row.date == date)
  }
}

// ─── GroupCalendar ───────────────────────────────────────────────────────────

/// The coordinator: one per running service instance.
///
/// Itineraries are keyed by [`PersonId`] — the unique id is the sole
/// equality key for people, so the id index and the person-to-engine
/// mapping are one structure. Derived views (name-sorted people, the
/// display table) are cached and dropped by every mutator before it
/// returns.
pub struct GroupCalendar<S: ItineraryStore = NoPersistence> {
  itineraries:   HashMap<PersonId, Itinerary>,
  display_range: Option<(NaiveDate, NaiveDate)>,
  store:         Option<S>,
  by_name:       OnceCell<Vec<Person>>,
  display:       OnceCell<DisplayTable>,
}

impl GroupCalendar<NoPersistence> {
  /// A calendar with no persistence collaborator.
  pub fn in_memory() -> Self { Self::with_store(None) }
}

impl<S: ItineraryStore> GroupCalendar<S> {
  pub fn with_store(store: Option<S>) -> Self {
    Self {
      itineraries: HashMap::new(),
      display_range: None,
      store,
      by_name: OnceCell::new(),
      display: OnceCell::new(),
    }
  }

  /// Load every person and their trips from `store`, then keep using it
  /// for subsequent writes. Trips go through the normal validation path,
  /// so corrupted rows surface here instead of as corrupted state later.
  pub fn hydrated(store: S) -> Result<Self> {
    let people = store.get_all_people().map_err(persistence)?;
    let mut itineraries = HashMap::new();
    for person in people {
      let mut itinerary = Itinerary::new(person.clone());
      for trip in store.get_trips_for_person(&person).map_err(persistence)? {
        itinerary.add_trip(trip)?;
      }
      itineraries.insert(person.id, itinerary);
    }
    tracing::info!(people = itineraries.len(), "hydrated calendar from store");
    Ok(Self {
      itineraries,
      display_range: None,
      store: Some(store),
      by_name: OnceCell::new(),
      display: OnceCell::new(),
    })
  }

  // ── People ────────────────────────────────────────────────────────────

  /// Add a person and create their empty itinerary. The store write runs
  /// before any state change, so a persistence failure leaves the calendar
  /// untouched.
  pub fn add_person(&mut self, person: Person) -> Result<()> {
    if self.itineraries.contains_key(&person.id) {
      return Err(Error::DuplicatePerson(person.id));
    }
    if let Some(store) = &self.store {
      store.add_person(&person).map_err(persistence)?;
    } else {
      tracing::debug!("no store configured; skipping person write");
    }
    tracing::info!(person = %person.display_name(), id = %person.id, "added person");
    self.itineraries.insert(person.id, Itinerary::new(person));
    self.by_name.take();
    self.display.take();
    Ok(())
  }

  /// Remove a person and their itinerary; returns the removed person.
  pub fn remove_person(&mut self, id: PersonId) -> Result<Person> {
    let person = self
      .itineraries
      .get(&id)
      .map(|itinerary| itinerary.person().clone())
      .ok_or(Error::UnknownPerson(id))?;
    if let Some(store) = &self.store {
      store.remove_person(&person).map_err(persistence)?;
    } else {
      tracing::debug!("no store configured; skipping person removal");
    }
    self.itineraries.remove(&id);
    self.by_name.take();
    self.display.take();
    tracing::info!(person = %person.display_name(), id = %id, "removed person");
    Ok(person)
  }

  /// All people ordered by `(last_name, first_name)`; cached until the
  /// person set changes.
  pub fn people(&self) -> &[Person] {
    self.by_name.get_or_init(|| {
      let mut people: Vec<Person> = self
        .itineraries
        .values()
        .map(|itinerary| itinerary.person().clone())
        .collect();
      people.sort_by(|a, b| a.name_key().cmp(&b.name_key()));
      people
    })
  }

  pub fn itinerary(&self, id: PersonId) -> Option<&Itinerary> {
    self.itineraries.get(&id)
  }

  // ── Trips ─────────────────────────────────────────────────────────────

  /// Add a trip to a person's itinerary. The candidate is validated before
  /// the store write and before any state change; rejected trips never
  /// reach the store.
  pub fn add_trip(&mut self, id: PersonId, trip: Trip) -> Result<()> {
    let Some(itinerary) = self.itineraries.get_mut(&id) else {
      return Err(Error::UnknownPerson(id));
    };
    itinerary.check_candidate(&trip)?;
    if let Some(store) = &self.store {
      store.add_trip(itinerary.person(), &trip).map_err(persistence)?;
    } else {
      tracing::debug!("no store configured; skipping trip write");
    }
    itinerary.add_trip(trip)?;
    self.display.take();
    Ok(())
  }

  /// Remove an exact trip from a person's itinerary.
  pub fn remove_trip(&mut self, id: PersonId, trip: &Trip) -> Result<()> {
    let Some(itinerary) = self.itineraries.get_mut(&id) else {
      return Err(Error::UnknownPerson(id));
    };
    if !itinerary.trips().contains(trip) {
      return Err(Error::UnknownTrip {
        start: trip.start_date(),
        end:   trip.end_date(),
      });
    }
    if let Some(store) = &self.store {
      store.remove_trip(itinerary.person(), trip).map_err(persistence)?;
    } else {
      tracing::debug!("no store configured; skipping trip removal");
    }
    itinerary.remove_trip(trip)?;
    self.display.take();
    Ok(())
  }

  // ── Display ───────────────────────────────────────────────────────────

  pub fn set_display_range(
    &mut self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<()> {
    if start > end {
      return Err(Error::InvalidRange { start, end });
    }
    self.display_range = Some((start, end));
    self.display.take();
    Ok(())
  }

  pub fn display_range(&self) -> Option<(NaiveDate, NaiveDate)> {
    self.display_range
  }

  /// The date-major, person-minor grid for the configured range. Built
  /// lazily on first access after invalidation.
  pub fn display_table(&self) -> &DisplayTable {
    self.display.get_or_init(|| self.build_display_table())
  }

  fn build_display_table(&self) -> DisplayTable {
    let Some((start, end)) = self.display_range else {
      return DisplayTable::default();
    };
    let per_person: Vec<(&Person, _)> = self
      .people()
      .iter()
      .filter_map(|person| self.itineraries.get(&person.id))
      .map(|itinerary| (itinerary.person(), itinerary.daily_calendar(start, end)))
      .collect();

    let rows = start
      .iter_days()
      .take_while(|day| *day <= end)
      .map(|day| DisplayRow {
        date:    day,
        entries: per_person
          .iter()
          .filter_map(|(person, calendar)| {
            calendar.get(&day).map(|location| PersonDay {
              person: (*person).clone(),
              day:    location.clone(),
            })
          })
          .collect(),
      })
      .collect();

    DisplayTable { start: Some(start), end: Some(end), rows }
  }

  /// True iff every person ends `date` in the same place. Errors when
  /// `date` is outside the configured display range (or no range is set).
  pub fn is_everyone_together(&self, date: NaiveDate) -> Result<bool> {
    let (start, end) = self.display_range.ok_or(Error::DisplayRangeNotSet)?;
    if date < start || date > end {
      return Err(Error::OutsideDisplayRange { date, start, end });
    }
    let distinct: HashSet<&Location> = self
      .display_table()
      .row(date)
      .map(|row| row.entries.iter().map(|entry| &entry.day.end).collect())
      .unwrap_or_default();
    Ok(distinct.len() == 1)
  }

  // ── Command dispatch ──────────────────────────────────────────────────

  /// Process one raw command envelope into a [`Response`]. Every
  /// recognized error becomes a 400 response; anything else is a
  /// programming defect and propagates.
  pub fn dispatch(&mut self, raw: &HashMap<String, String>) -> Response {
    tracing::info!(?raw, "processing command");
    match self.try_dispatch(raw) {
      Ok(message) => Response::ok(message),
      Err(err) => {
        tracing::warn!(%err, "command rejected");
        Response::rejected(&err)
      }
    }
  }

  fn try_dispatch(&mut self, raw: &HashMap<String, String>) -> Result<String> {
    match Command::parse(raw)? {
      Command::AddPerson { person_id, last_name, first_name, home } => {
        let person = match person_id {
          Some(id) => Person::with_id(id, last_name, first_name, home),
          None => Person::new(last_name, first_name, home),
        };
        let name = person.display_name();
        let id = person.id;
        self.add_person(person)?;
        Ok(format!("Added {name} ({id})."))
      }
      Command::RemovePerson { person_id } => {
        let person = self.remove_person(person_id)?;
        Ok(format!("Removed {}.", person.display_name()))
      }
      Command::AddTrip { person_id, trip } => {
        let described = trip.to_string();
        self.add_trip(person_id, trip)?;
        Ok(format!("Added trip {described}."))
      }
      Command::SetDisplayRange { start, end } => {
        self.set_display_range(start, end)?;
        Ok(format!("Display range set to {start}..{end}."))
      }
    }
  }
}

fn persistence(err: impl std::error::Error) -> Error {
  Error::Persistence(err.to_string())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
