//! Encoding and decoding helpers between entities and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored in the shared RFC 3339 format from
//! [`crm_core::timestamp`]. Status is stored as its variant name.

use crm_core::{
  entity::{Customer, Note},
  model::Status,
  timestamp,
};
use rusqlite::Row;

use crate::{Error, Result};

/// Column list matching [`read_customer_row`].
pub const CUSTOMER_COLUMNS: &str =
  "id, first_name, last_name, address, email, company, status, created, row_version";

/// Column list matching [`read_note_row`].
pub const NOTE_COLUMNS: &str = "id, content, customer_id, row_version";

pub fn encode_status(s: Status) -> &'static str { s.into() }

/// Rows written by this store only ever hold known names; anything else is
/// corruption and fails loudly.
pub fn decode_status(s: &str) -> Result<Status> { Ok(Status::from_name(s)?) }

pub fn row_id(id: i64) -> Result<i32> {
  i32::try_from(id).map_err(|_| Error::IdOutOfRange(id))
}

/// Raw values read directly from a `customers` row.
pub struct RawCustomer {
  pub id:          i32,
  pub first_name:  String,
  pub last_name:   String,
  pub address:     Option<String>,
  pub email:       Option<String>,
  pub company:     Option<String>,
  pub status:      String,
  pub created:     String,
  pub row_version: i64,
}

pub fn read_customer_row(row: &Row<'_>) -> rusqlite::Result<RawCustomer> {
  Ok(RawCustomer {
    id:          row.get(0)?,
    first_name:  row.get(1)?,
    last_name:   row.get(2)?,
    address:     row.get(3)?,
    email:       row.get(4)?,
    company:     row.get(5)?,
    status:      row.get(6)?,
    created:     row.get(7)?,
    row_version: row.get(8)?,
  })
}

impl RawCustomer {
  pub fn into_entity(self) -> Result<Customer> {
    Ok(Customer {
      id:          self.id,
      first_name:  self.first_name,
      last_name:   self.last_name,
      address:     self.address,
      email:       self.email,
      company:     self.company,
      status:      decode_status(&self.status)?,
      created:     timestamp::parse(&self.created)?,
      row_version: self.row_version,
    })
  }
}

/// Note columns need no decoding beyond what rusqlite already does.
pub fn read_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
  Ok(Note {
    id:          row.get(0)?,
    content:     row.get(1)?,
    customer_id: row.get(2)?,
    row_version: row.get(3)?,
  })
}
