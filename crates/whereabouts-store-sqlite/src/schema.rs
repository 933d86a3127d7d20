//! SQL schema for the whereabouts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS person (
    id         TEXT PRIMARY KEY,
    last_name  TEXT NOT NULL,   -- folded (lowercase) form
    first_name TEXT NOT NULL,   -- folded (lowercase) form
    country    TEXT NOT NULL,   -- wire token, e.g. 'NETHERLANDS'
    city       TEXT NOT NULL    -- folded (lowercase) form
);

-- One person's trips can nest but never share endpoints, so the start
-- date keys a trip within a person and the end date carries its own
-- uniqueness constraint.
CREATE TABLE IF NOT EXISTS trip (
    person_id  TEXT NOT NULL REFERENCES person(id) ON DELETE CASCADE,
    country    TEXT NOT NULL,
    city       TEXT NOT NULL,
    start_date TEXT NOT NULL,   -- ISO 8601 date
    end_date   TEXT NOT NULL,   -- ISO 8601 date
    PRIMARY KEY (person_id, start_date),
    UNIQUE (person_id, end_date)
);

PRAGMA user_version = 1;
";
