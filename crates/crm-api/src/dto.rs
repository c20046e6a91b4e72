//! Wire representations of the domain models and the mapping between them.
//!
//! Timestamps travel as RFC 3339 strings and status as its variant name.
//! Mapping a DTO to a model is strict about timestamps (a bad one is an
//! error) but lenient about status (unknown text becomes `Prospective`).
//! Handlers that need a strict status check do it before mapping.

use chrono::{DateTime, Utc};
use crm_core::{
  model::{CustomerDetail, CustomerSummary, NewNote, NoteDetail, Status},
  timestamp,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ─── Customers ───────────────────────────────────────────────────────────────

/// Text fields are limited to 256 characters; both names are required and
/// must not be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerDetailDto {
  #[serde(default)]
  pub id:         i32,
  #[validate(length(min = 1, max = 256), custom(function = "not_blank"))]
  pub first_name: String,
  #[validate(length(min = 1, max = 256), custom(function = "not_blank"))]
  pub last_name:  String,
  #[validate(length(max = 256))]
  pub address:    Option<String>,
  #[validate(length(max = 256))]
  pub email:      Option<String>,
  #[validate(length(max = 256))]
  pub company:    Option<String>,
  pub status:     String,
  /// Ignored on create; the server assigns the creation time.
  #[serde(default)]
  pub created:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummaryDto {
  pub id:         i32,
  pub first_name: String,
  pub last_name:  String,
  pub status:     String,
}

/// Body of `PUT /customers/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateDto {
  /// Optional echo of the path id; must match it when present.
  #[serde(default)]
  pub customer_id: Option<i32>,
  pub status:      String,
}

impl From<&CustomerDetail> for CustomerDetailDto {
  fn from(d: &CustomerDetail) -> Self {
    Self {
      id:         d.id,
      first_name: d.first_name.clone(),
      last_name:  d.last_name.clone(),
      address:    d.address.clone(),
      email:      d.email.clone(),
      company:    d.company.clone(),
      status:     d.status.to_string(),
      created:    Some(timestamp::format(d.created)),
    }
  }
}

impl TryFrom<CustomerDetailDto> for CustomerDetail {
  type Error = crm_core::Error;

  fn try_from(dto: CustomerDetailDto) -> Result<Self, Self::Error> {
    let created = match dto.created.as_deref() {
      Some(s) => timestamp::parse(s)?,
      None => DateTime::<Utc>::default(),
    };

    Ok(Self {
      id: dto.id,
      first_name: dto.first_name,
      last_name: dto.last_name,
      address: dto.address,
      email: dto.email,
      company: dto.company,
      status: Status::parse_or_default(&dto.status),
      created,
    })
  }
}

impl From<&CustomerSummary> for CustomerSummaryDto {
  fn from(s: &CustomerSummary) -> Self {
    Self {
      id:         s.id,
      first_name: s.first_name.clone(),
      last_name:  s.last_name.clone(),
      status:     s.status.to_string(),
    }
  }
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetailDto {
  pub id:      i32,
  pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNoteDto {
  pub customer_id: i32,
  pub content:     Option<String>,
}

impl From<&NoteDetail> for NoteDetailDto {
  fn from(n: &NoteDetail) -> Self {
    Self { id: n.id, content: n.content.clone() }
  }
}

impl From<NoteDetailDto> for NoteDetail {
  fn from(dto: NoteDetailDto) -> Self {
    Self { id: dto.id, content: dto.content }
  }
}

impl From<NewNoteDto> for NewNote {
  fn from(dto: NewNoteDto) -> Self {
    Self { customer_id: dto.customer_id, content: dto.content }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn not_blank(value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new("blank").with_message("is required".into()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn detail(id: i32, first_name: &str, year: i32) -> CustomerDetail {
    CustomerDetail {
      id,
      first_name: first_name.into(),
      last_name: "Smith".into(),
      address: Some("Some Street".into()),
      email: Some(format!("{first_name}@smith.com")),
      company: None,
      status: Status::Current,
      created: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
    }
  }

  fn dto(created: &str, status: &str) -> CustomerDetailDto {
    CustomerDetailDto {
      id:         1,
      first_name: "Liz".into(),
      last_name:  "Smith".into(),
      address:    Some("Some Street".into()),
      email:      Some("liz@smith.com".into()),
      company:    None,
      status:     status.into(),
      created:    Some(created.into()),
    }
  }

  #[test]
  fn customer_detail_to_dto() {
    for (id, name, year) in [(1, "Jean", 1999), (5, "some other name", 1876), (12, "", 1956)] {
      let model = detail(id, name, year);
      let dto = CustomerDetailDto::from(&model);

      assert_eq!(dto.id, model.id);
      assert_eq!(dto.address, model.address);
      assert_eq!(dto.created, Some(timestamp::format(model.created)));
      assert_eq!(dto.first_name, model.first_name);
      assert_eq!(dto.last_name, model.last_name);
      assert_eq!(dto.status, "Current");
      assert_eq!(dto.email, model.email);
    }
  }

  #[test]
  fn customer_detail_survives_a_dto_round_trip() {
    for (id, name, year) in [(1, "Jean", 1999), (5, "some other name", 1876), (12, "", 1956)] {
      let model = detail(id, name, year);
      let back = CustomerDetail::try_from(CustomerDetailDto::from(&model)).unwrap();
      assert_eq!(back, model);
    }
  }

  #[test]
  fn unparsable_created_is_an_error() {
    let err = CustomerDetail::try_from(dto("not a date", "Current")).unwrap_err();
    assert!(matches!(err, crm_core::Error::Timestamp { .. }));
  }

  #[test]
  fn unparsable_status_becomes_prospective() {
    let model = CustomerDetail::try_from(dto(
      "2010-01-01T00:00:00.000000000Z",
      "not a valid Status string",
    ))
    .unwrap();
    assert_eq!(model.status, Status::Prospective);
  }

  #[test]
  fn missing_created_maps_to_epoch_placeholder() {
    let mut input = dto("", "Current");
    input.created = None;
    let model = CustomerDetail::try_from(input).unwrap();
    assert_eq!(model.created, DateTime::<Utc>::default());
  }

  #[test]
  fn customer_summary_to_dto() {
    let summary = CustomerSummary {
      id:         5,
      first_name: "Jean".into(),
      last_name:  "Smith".into(),
      status:     Status::NonActive,
    };
    assert_eq!(CustomerSummaryDto::from(&summary), CustomerSummaryDto {
      id:         5,
      first_name: "Jean".into(),
      last_name:  "Smith".into(),
      status:     "NonActive".into(),
    });
  }

  #[test]
  fn note_mappings_keep_content() {
    for (id, content) in [(1, Some("some content")), (12, None)] {
      let model = NoteDetail { id, content: content.map(str::to_owned) };
      let dto = NoteDetailDto::from(&model);
      assert_eq!(dto.id, id);
      assert_eq!(dto.content.as_deref(), content);
      assert_eq!(NoteDetail::from(dto), model);
    }

    let new_note = NewNote::from(NewNoteDto { customer_id: 5, content: None });
    assert_eq!(new_note, NewNote { customer_id: 5, content: None });
  }

  #[test]
  fn validation_enforces_required_and_length() {
    assert!(dto("", "Current").validate().is_ok());

    let mut blank = dto("", "Current");
    blank.last_name = "  ".into();
    let errors = blank.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("last_name"));
    assert!(!errors.field_errors().contains_key("first_name"));

    let mut empty = dto("", "Current");
    empty.first_name = String::new();
    assert!(empty.validate().unwrap_err().field_errors().contains_key("first_name"));

    let mut long = dto("", "Current");
    long.company = Some("c".repeat(257));
    assert!(long.validate().unwrap_err().field_errors().contains_key("company"));

    let mut edge = dto("", "Current");
    edge.email = Some("e".repeat(256));
    edge.last_name = "é".repeat(256);
    assert!(edge.validate().is_ok());

    let mut absent = dto("", "Current");
    absent.address = None;
    assert!(absent.validate().is_ok());
  }

  #[test]
  fn dto_json_uses_snake_case_and_optional_created() {
    let parsed: CustomerDetailDto = serde_json::from_str(
      r#"{"first_name":"Liz","last_name":"Smith","address":null,"email":null,"company":null,"status":"Current"}"#,
    )
    .unwrap();
    assert_eq!(parsed.id, 0);
    assert_eq!(parsed.created, None);
  }
}
