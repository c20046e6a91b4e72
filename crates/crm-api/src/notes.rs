//! Handlers for `/notes` endpoints.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use crm_core::repository::NotesRepository;

use crate::{
  Services,
  dto::{NewNoteDto, NoteDetailDto},
  error::ApiError,
};

/// `PUT /notes/{id}`. Body: [`NoteDetailDto`]; its `id` must match the path.
/// Always 204 once the body is accepted, whether or not the note exists.
pub async fn update<S: Services>(
  State(services): State<S>,
  Path(id): Path<i32>,
  body: Result<Json<NoteDetailDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  if body.id != id {
    return Err(ApiError::BadRequest("note id mismatch".to_string()));
  }

  let outcome = services
    .notes()
    .update_note(body.into())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  // An update of an absent note is not reported to the client.
  if outcome.is_not_found() {
    tracing::debug!(note_id = id, "update of missing note ignored");
  }

  Ok(StatusCode::NO_CONTENT)
}

/// `POST /notes`. Returns 201 + the stored note.
pub async fn create<S: Services>(
  State(services): State<S>,
  body: Result<Json<NewNoteDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let note = services
    .notes()
    .add_note(body.into())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let location = format!("/notes/{}", note.id);
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(NoteDetailDto::from(&note)),
  ))
}
