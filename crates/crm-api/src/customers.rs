//! Handlers for `/customers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/customers` | All customers as summaries |
//! | `POST`   | `/customers` | Body: [`CustomerDetailDto`]; 201 + `Location` |
//! | `GET`    | `/customers/{id}` | 404 if not found |
//! | `DELETE` | `/customers/{id}` | Returns the deleted customer; 404 if not found |
//! | `GET`    | `/customers/{id}/notes` | Empty list for an unknown customer |
//! | `PUT`    | `/customers/{id}/status` | Body: [`StatusUpdateDto`]; 204 |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use crm_core::{
  Outcome,
  model::{CustomerDetail, Status},
  repository::CustomerRepository,
};

use validator::Validate as _;

use crate::{
  Services,
  dto::{CustomerDetailDto, CustomerSummaryDto, NoteDetailDto, StatusUpdateDto},
  error::ApiError,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /customers`
pub async fn list<S: Services>(
  State(services): State<S>,
) -> Result<Json<Vec<CustomerSummaryDto>>, ApiError> {
  let summaries = services
    .customers()
    .customer_summaries()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(summaries.iter().map(CustomerSummaryDto::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /customers/{id}`
pub async fn get_one<S: Services>(
  State(services): State<S>,
  Path(id): Path<i32>,
) -> Result<Json<CustomerDetailDto>, ApiError> {
  let outcome = services
    .customers()
    .customer_detail(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match outcome {
    Outcome::Completed(detail) => Ok(Json(CustomerDetailDto::from(&detail))),
    Outcome::NotFound => Err(customer_not_found(id)),
  }
}

// ─── Notes ────────────────────────────────────────────────────────────────────

/// `GET /customers/{id}/notes`
pub async fn notes<S: Services>(
  State(services): State<S>,
  Path(id): Path<i32>,
) -> Result<Json<Vec<NoteDetailDto>>, ApiError> {
  let notes = services
    .customers()
    .customer_notes(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(notes.iter().map(NoteDetailDto::from).collect()))
}

// ─── Status ───────────────────────────────────────────────────────────────────

/// `PUT /customers/{id}/status`. Body: `{"status":"Current"}`.
pub async fn update_status<S: Services>(
  State(services): State<S>,
  Path(id): Path<i32>,
  body: Result<Json<StatusUpdateDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  if body.customer_id.is_some_and(|body_id| body_id != id) {
    return Err(ApiError::BadRequest("customer id mismatch".to_string()));
  }
  let status = Status::from_name(&body.status)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let outcome = services
    .customers()
    .update_customer_status(id, status)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match outcome {
    Outcome::Completed(()) => Ok(StatusCode::NO_CONTENT),
    Outcome::NotFound => Err(customer_not_found(id)),
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /customers`. Returns 201 + the stored customer.
pub async fn create<S: Services>(
  State(services): State<S>,
  body: Result<Json<CustomerDetailDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  body.validate()?;
  Status::from_name(&body.status).map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let detail = CustomerDetail::try_from(body)?;
  let added = services
    .customers()
    .add_customer(detail)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let location = format!("/customers/{}", added.id);
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(CustomerDetailDto::from(&added)),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /customers/{id}`. Returns the deleted customer.
pub async fn delete_one<S: Services>(
  State(services): State<S>,
  Path(id): Path<i32>,
) -> Result<Json<CustomerDetailDto>, ApiError> {
  let outcome = services
    .customers()
    .delete_customer(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  match outcome {
    Outcome::Completed(detail) => Ok(Json(CustomerDetailDto::from(&detail))),
    Outcome::NotFound => Err(customer_not_found(id)),
  }
}

fn customer_not_found(id: i32) -> ApiError {
  ApiError::NotFound(format!("customer {id} not found"))
}
