//! SQL schema for the fio SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version; later migrations will be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Dimension tables: one row per distinct label, shared across people.
CREATE TABLE IF NOT EXISTS genders (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    gender  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS nationalities (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    nationality  TEXT NOT NULL UNIQUE  -- country code, e.g. 'US'
);

CREATE TABLE IF NOT EXISTS people (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL,
    surname         TEXT    NOT NULL,
    patronymic      TEXT,
    age             INTEGER NOT NULL CHECK (age >= 0),
    gender_id       INTEGER NOT NULL REFERENCES genders(id),
    nationality_id  INTEGER NOT NULL REFERENCES nationalities(id)
);

CREATE INDEX IF NOT EXISTS people_gender_idx      ON people(gender_id);
CREATE INDEX IF NOT EXISTS people_nationality_idx ON people(nationality_id);

PRAGMA user_version = 1;
";
