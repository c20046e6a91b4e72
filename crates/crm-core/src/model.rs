//! Domain models exchanged between the repositories and the HTTP layer.
//!
//! These are denormalised views: a [`CustomerDetail`] carries every customer
//! field, a [`CustomerSummary`] only what a listing needs.

use chrono::{DateTime, Utc};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a customer stands in the relationship lifecycle. The text form is
/// the variant name, e.g. `"NonActive"`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString,
  IntoStaticStr,
)]
pub enum Status {
  #[default]
  Prospective,
  Current,
  NonActive,
}

impl Status {
  /// Strict parse; unknown text is rejected.
  pub fn from_name(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnrecognisedStatus(s.to_owned()))
  }

  /// Lenient parse; unknown text yields [`Status::Prospective`].
  pub fn parse_or_default(s: &str) -> Self { s.parse().unwrap_or_default() }
}

// ─── Customers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail {
  pub id:         i32,
  pub first_name: String,
  pub last_name:  String,
  pub address:    Option<String>,
  pub email:      Option<String>,
  pub company:    Option<String>,
  pub status:     Status,
  /// Assigned by the repository when the customer is first persisted.
  pub created:    DateTime<Utc>,
}

/// The listing projection of a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
  pub id:         i32,
  pub first_name: String,
  pub last_name:  String,
  pub status:     Status,
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetail {
  pub id:      i32,
  pub content: Option<String>,
}

/// Input to [`crate::repository::NotesRepository::add_note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
  pub customer_id: i32,
  pub content:     Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_names_round_trip() {
    for status in [Status::Prospective, Status::Current, Status::NonActive] {
      assert_eq!(Status::from_name(&status.to_string()).unwrap(), status);
    }
    assert_eq!(<&str>::from(Status::NonActive), "NonActive");
  }

  #[test]
  fn strict_parse_rejects_unknown_text() {
    for text in ["mauve", "pensive", "current", ""] {
      let err = Status::from_name(text).unwrap_err();
      assert_eq!(err.to_string(), "unrecognised status");
    }
  }

  #[test]
  fn lenient_parse_defaults_to_prospective() {
    assert_eq!(Status::parse_or_default("Peach"), Status::Prospective);
    assert_eq!(Status::parse_or_default("Current"), Status::Current);
  }
}
