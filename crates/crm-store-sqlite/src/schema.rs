//! SQL schema for the CRM SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS customers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL CHECK (length(first_name) <= 256),
    last_name   TEXT    NOT NULL CHECK (length(last_name)  <= 256),
    address     TEXT             CHECK (length(address)    <= 256),
    email       TEXT             CHECK (length(email)      <= 256),
    company     TEXT             CHECK (length(company)    <= 256),
    status      TEXT    NOT NULL,           -- 'Prospective' | 'Current' | 'NonActive'
    created     TEXT    NOT NULL,           -- RFC 3339 UTC; server-assigned
    row_version INTEGER NOT NULL DEFAULT 1  -- bumped on every UPDATE
);

-- Customers own their notes: deleting a customer deletes its notes.
CREATE TABLE IF NOT EXISTS notes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    content     TEXT,
    customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    row_version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS notes_customer_idx ON notes(customer_id);

PRAGMA user_version = 1;
";
