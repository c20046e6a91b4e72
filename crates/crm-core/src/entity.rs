//! Persisted entity shapes and their mapping to and from domain models.
//!
//! Notes are not embedded in their customer. Each note carries the
//! `customer_id` foreign key instead; the store enforces the reference and
//! cascades deletes from the customer side.

use chrono::{DateTime, Utc};

use crate::model::{CustomerDetail, CustomerSummary, NewNote, NoteDetail, Status};

/// A row in the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
  pub id:          i32,
  pub first_name:  String,
  pub last_name:   String,
  pub address:     Option<String>,
  pub email:       Option<String>,
  pub company:     Option<String>,
  pub status:      Status,
  pub created:     DateTime<Utc>,
  /// Optimistic-concurrency token; bumped by the store on every save.
  pub row_version: i64,
}

/// A row in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
  pub id:          i32,
  pub content:     Option<String>,
  pub customer_id: i32,
  pub row_version: i64,
}

impl Customer {
  /// Build an unsaved entity. The id and row version are left for the store
  /// to assign.
  pub fn from_detail(detail: CustomerDetail) -> Self {
    Self {
      id:          detail.id,
      first_name:  detail.first_name,
      last_name:   detail.last_name,
      address:     detail.address,
      email:       detail.email,
      company:     detail.company,
      status:      detail.status,
      created:     detail.created,
      row_version: 0,
    }
  }
}

impl Note {
  pub fn from_new(new_note: NewNote) -> Self {
    Self {
      id:          0,
      content:     new_note.content,
      customer_id: new_note.customer_id,
      row_version: 0,
    }
  }
}

impl From<&Customer> for CustomerDetail {
  fn from(c: &Customer) -> Self {
    Self {
      id:         c.id,
      first_name: c.first_name.clone(),
      last_name:  c.last_name.clone(),
      address:    c.address.clone(),
      email:      c.email.clone(),
      company:    c.company.clone(),
      status:     c.status,
      created:    c.created,
    }
  }
}

impl From<&Customer> for CustomerSummary {
  fn from(c: &Customer) -> Self {
    Self {
      id:         c.id,
      first_name: c.first_name.clone(),
      last_name:  c.last_name.clone(),
      status:     c.status,
    }
  }
}

impl From<&Note> for NoteDetail {
  fn from(n: &Note) -> Self {
    Self { id: n.id, content: n.content.clone() }
  }
}
