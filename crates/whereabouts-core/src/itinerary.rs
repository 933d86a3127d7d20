//! The single-person itinerary engine.
//!
//! Owns one person's set of trips, validates candidates against the
//! non-overlap rules, and derives where the person starts and ends every
//! calendar day of an arbitrary range.

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::{
  Error, Result,
  location::Location,
  person::Person,
  trip::{DayLocation, Trip},
};

/// One person's trips plus a lazily sorted view of them.
///
/// All mutators drop the sorted cache before returning, so any read within
/// the same execution recomputes from the live trip set.
#[derive(Debug)]
pub struct Itinerary {
  person: Person,
  trips:  HashSet<Trip>,
  sorted: OnceCell<Vec<Trip>>,
}

impl Itinerary {
  pub fn new(person: Person) -> Self {
    tracing::info!(person = %person.display_name(), "created itinerary");
    Self { person, trips: HashSet::new(), sorted: OnceCell::new() }
  }

  pub fn person(&self) -> &Person { &self.person }

  pub fn home(&self) -> &Location { &self.person.home }

  // ── Trip validation ───────────────────────────────────────────────────

  /// Check a candidate trip against every existing trip.
  ///
  /// Rejected: a shared start date, a shared end date, or a partial overlap
  /// (the candidate starts strictly inside an existing trip and ends
  /// strictly outside it, or the reverse). A trip fully containing or fully
  /// contained by another is accepted, whichever is added first.
  pub fn check_candidate(&self, candidate: &Trip) -> Result<()> {
    for existing in &self.trips {
      if candidate.start_date() == existing.start_date() {
        return Err(Error::StartDateCollision { date: candidate.start_date() });
      }
      if candidate.end_date() == existing.end_date() {
        return Err(Error::EndDateCollision { date: candidate.end_date() });
      }
      let starts_before_and_ends_inside = candidate.start_date()
        < existing.start_date()
        && existing.start_date() < candidate.end_date()
        && candidate.end_date() < existing.end_date();
      let starts_inside_and_ends_after = existing.start_date()
        < candidate.start_date()
        && candidate.start_date() < existing.end_date()
        && existing.end_date() < candidate.end_date();
      if starts_before_and_ends_inside || starts_inside_and_ends_after {
        return Err(Error::PartialOverlap {
          start:          candidate.start_date(),
          end:            candidate.end_date(),
          existing_start: existing.start_date(),
          existing_end:   existing.end_date(),
        });
      }
    }
    Ok(())
  }

  // ── Mutation ──────────────────────────────────────────────────────────

  /// Add a trip after validating it against the existing set.
  pub fn add_trip(&mut self, trip: Trip) -> Result<()> {
    self.check_candidate(&trip)?;
    tracing::info!(person = %self.person.display_name(), %trip, "adding trip");
    self.trips.insert(trip);
    self.sorted.take();
    Ok(())
  }

  /// Remove an exact trip; errors if it is not on this itinerary.
  pub fn remove_trip(&mut self, trip: &Trip) -> Result<()> {
    if !self.trips.remove(trip) {
      return Err(Error::UnknownTrip {
        start: trip.start_date(),
        end:   trip.end_date(),
      });
    }
    tracing::info!(person = %self.person.display_name(), %trip, "removed trip");
    self.sorted.take();
    Ok(())
  }

  // ── Derived views ─────────────────────────────────────────────────────

  /// Trips ordered ascending by `(start_date, end_date)`; recomputed only
  /// when the underlying set has changed since the last read.
  pub fn trips(&self) -> &[Trip] {
    self.sorted.get_or_init(|| {
      let mut list: Vec<Trip> = self.trips.iter().cloned().collect();
      list.sort_by_key(|t| (t.start_date(), t.end_date()));
      list
    })
  }

  /// Where the person starts and ends the day trip `idx` departs.
  fn departure_day(&self, trips: &[Trip], idx: usize) -> DayLocation {
    let trip = &trips[idx];
    // Departing on or before the previous trip's last day means direct
    // travel between destinations, with no home stopover.
    if idx > 0 {
      let prev = &trips[idx - 1];
      if trip.start_date() <= prev.end_date() {
        return DayLocation {
          start: prev.destination().clone(),
          end:   trip.destination().clone(),
        };
      }
    }
    DayLocation { start: self.home().clone(), end: trip.destination().clone() }
  }

  /// Where the person starts and ends the day trip `idx` returns.
  fn return_day(&self, trips: &[Trip], idx: usize) -> DayLocation {
    let trip = &trips[idx];
    // Finishing while the previous trip is still running: travel back to
    // its destination, not home.
    if idx > 0 {
      let prev = &trips[idx - 1];
      if trip.end_date() < prev.end_date() {
        return DayLocation {
          start: trip.destination().clone(),
          end:   prev.destination().clone(),
        };
      }
    }
    match trips.get(idx + 1) {
      // Returning on the next trip's first day: direct connection.
      Some(next) if trip.end_date() == next.start_date() => DayLocation {
        start: trip.destination().clone(),
        end:   next.destination().clone(),
      },
      _ => DayLocation {
        start: trip.destination().clone(),
        end:   self.home().clone(),
      },
    }
  }

  /// Every boundary date (a start or end of some trip) mapped to its
  /// derived location pair. Entries are written in sorted trip order, so a
  /// date shared between adjacent or nested trips keeps the later write.
  fn travel_days(&self) -> BTreeMap<NaiveDate, DayLocation> {
    let trips = self.trips();
    let mut days = BTreeMap::new();
    for (idx, trip) in trips.iter().enumerate() {
      days.insert(trip.start_date(), self.departure_day(trips, idx));
      days.insert(trip.end_date(), self.return_day(trips, idx));
    }
    days
  }

  fn day_location(
    &self,
    travel: &BTreeMap<NaiveDate, DayLocation>,
    day: NaiveDate,
  ) -> DayLocation {
    if let Some(exact) = travel.get(&day) {
      return exact.clone();
    }
    match travel.range(..day).next_back() {
      // Strictly between boundaries: stationary wherever the most recent
      // boundary day ended.
      Some((_, before)) if travel.range(day..).next().is_some() => {
        DayLocation::stationary(before.end.clone())
      }
      // Before the first boundary, after the last, or no trips at all.
      _ => DayLocation::stationary(self.home().clone()),
    }
  }

  /// The inclusive day-by-day table over `[start, end]`.
  pub fn daily_calendar(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> BTreeMap<NaiveDate, DayLocation> {
    let travel = self.travel_days();
    start
      .iter_days()
      .take_while(|day| *day <= end)
      .map(|day| (day, self.day_location(&travel, day)))
      .collect()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
