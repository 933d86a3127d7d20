//! Tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use whereabouts_core::{
  location::{CiString, Country, Location},
  person::Person,
  store::ItineraryStore,
  trip::Trip,
};

use crate::{Error, SqliteStore};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_person() -> Person {
  Person::new(
    CiString::new("Hilbers").unwrap(),
    CiString::new("Adriaan").unwrap(),
    Location::new(Country::Netherlands, "Amsterdam").unwrap(),
  )
}

fn sample_trip() -> Trip {
  Trip::new(
    Location::new(Country::Austria, "Sankt-Anton").unwrap(),
    date(2024, 8, 5),
    date(2024, 8, 9),
  )
  .unwrap()
}

// ─── People ──────────────────────────────────────────────────────────────────

#[test]
fn empty_database_has_no_people() {
  assert!(store().get_all_people().unwrap().is_empty());
}

#[test]
fn add_person_and_read_back() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();

  let people = s.get_all_people().unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0], person);
  // Identity survives, and so do the folded structural fields.
  assert_eq!(people[0].last_name.as_str(), "hilbers");
  assert_eq!(people[0].home, person.home);
}

#[test]
fn duplicate_person_insert_is_distinguishable() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();

  let err = s.add_person(&person).unwrap_err();
  assert!(matches!(err, Error::DuplicatePerson(id) if id == person.id));
}

#[test]
fn remove_person_deletes_the_row() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  s.remove_person(&person).unwrap();
  assert!(s.get_all_people().unwrap().is_empty());
}

#[test]
fn remove_missing_person_is_distinguishable() {
  let s = store();
  let err = s.remove_person(&sample_person()).unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(_)));
}

// ─── Trips ───────────────────────────────────────────────────────────────────

#[test]
fn add_trip_and_read_back() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  let trip = sample_trip();
  s.add_trip(&person, &trip).unwrap();

  let trips = s.get_trips_for_person(&person).unwrap();
  assert_eq!(trips, vec![trip]);
}

#[test]
fn trips_are_scoped_to_their_person() {
  let s = store();
  let traveller = sample_person();
  let homebody = Person::new(
    CiString::new("Abel").unwrap(),
    CiString::new("Ben").unwrap(),
    Location::new(Country::Norway, "Oslo").unwrap(),
  );
  s.add_person(&traveller).unwrap();
  s.add_person(&homebody).unwrap();
  s.add_trip(&traveller, &sample_trip()).unwrap();

  assert_eq!(s.get_trips_for_person(&traveller).unwrap().len(), 1);
  assert!(s.get_trips_for_person(&homebody).unwrap().is_empty());
}

#[test]
fn trips_come_back_in_date_order() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();

  let later = Trip::new(
    Location::new(Country::UnitedKingdom, "London").unwrap(),
    date(2024, 8, 20),
    date(2024, 8, 22),
  )
  .unwrap();
  s.add_trip(&person, &later).unwrap();
  s.add_trip(&person, &sample_trip()).unwrap();

  let trips = s.get_trips_for_person(&person).unwrap();
  assert_eq!(trips, vec![sample_trip(), later]);
}

#[test]
fn trip_for_unknown_person_is_rejected() {
  let s = store();
  let person = sample_person();
  let err = s.add_trip(&person, &sample_trip()).unwrap_err();
  assert!(matches!(err, Error::TripRejected(_)));
}

#[test]
fn colliding_start_date_is_rejected_by_constraint() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  s.add_trip(&person, &sample_trip()).unwrap();

  let colliding = Trip::new(
    Location::new(Country::Norway, "Bergen").unwrap(),
    date(2024, 8, 5),
    date(2024, 8, 7),
  )
  .unwrap();
  let err = s.add_trip(&person, &colliding).unwrap_err();
  assert!(matches!(err, Error::TripRejected(_)));
}

#[test]
fn remove_trip_deletes_the_row() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  let trip = sample_trip();
  s.add_trip(&person, &trip).unwrap();

  s.remove_trip(&person, &trip).unwrap();
  assert!(s.get_trips_for_person(&person).unwrap().is_empty());
}

#[test]
fn remove_missing_trip_is_distinguishable() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  let err = s.remove_trip(&person, &sample_trip()).unwrap_err();
  assert!(matches!(err, Error::TripNotFound));
}

#[test]
fn removing_a_person_cascades_their_trips() {
  let s = store();
  let person = sample_person();
  s.add_person(&person).unwrap();
  s.add_trip(&person, &sample_trip()).unwrap();

  s.remove_person(&person).unwrap();

  // Re-adding the same person finds no orphaned trips.
  s.add_person(&person).unwrap();
  assert!(s.get_trips_for_person(&person).unwrap().is_empty());
}
