//! Repository traits and their context-backed implementations.
//!
//! Repositories translate persistence results into [`Outcome`]s. A missing
//! entity is `Outcome::NotFound`; the only recovery performed is a single
//! existence re-check after a concurrency conflict.

mod customers;
mod notes;

use std::future::Future;

pub use customers::CustomerRepo;
pub use notes::NotesRepo;

use crate::{
  Outcome,
  context::StoreError,
  model::{CustomerDetail, CustomerSummary, NewNote, NoteDetail, Status},
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Customer lookups and mutations.
pub trait CustomerRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Listing projection of every customer.
  fn customer_summaries(
    &self,
  ) -> impl Future<Output = Result<Vec<CustomerSummary>, Self::Error>> + Send + '_;

  fn customer_detail(
    &self,
    id: i32,
  ) -> impl Future<Output = Result<Outcome<CustomerDetail>, Self::Error>> + Send + '_;

  /// Notes for a customer. There is no distinct not-found signal here: an
  /// unknown customer simply has no notes.
  fn customer_notes(
    &self,
    customer_id: i32,
  ) -> impl Future<Output = Result<Vec<NoteDetail>, Self::Error>> + Send + '_;

  /// Persist a new customer. The caller's `id` and `created` are ignored;
  /// the returned detail carries the assigned values.
  fn add_customer(
    &self,
    detail: CustomerDetail,
  ) -> impl Future<Output = Result<CustomerDetail, Self::Error>> + Send + '_;

  fn update_customer_status(
    &self,
    id: i32,
    status: Status,
  ) -> impl Future<Output = Result<Outcome, Self::Error>> + Send + '_;

  /// Remove a customer (and its notes), returning its last known detail.
  fn delete_customer(
    &self,
    id: i32,
  ) -> impl Future<Output = Result<Outcome<CustomerDetail>, Self::Error>> + Send + '_;
}

/// Note lookups and mutations.
pub trait NotesRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn note_detail(
    &self,
    id: i32,
  ) -> impl Future<Output = Result<Outcome<NoteDetail>, Self::Error>> + Send + '_;

  /// Replace a note's content.
  fn update_note(
    &self,
    detail: NoteDetail,
  ) -> impl Future<Output = Result<Outcome, Self::Error>> + Send + '_;

  /// Persist a new note. No existence check is made on `customer_id`; an
  /// unknown customer surfaces as a store error.
  fn add_note(
    &self,
    new_note: NewNote,
  ) -> impl Future<Output = Result<NoteDetail, Self::Error>> + Send + '_;
}

// ─── Conflict handling ───────────────────────────────────────────────────────

/// Classify the result of a write against an existing row.
///
/// A concurrency conflict on a row that has since vanished becomes
/// `NotFound`. A conflict on a row that still exists, and every other error,
/// is returned unchanged.
async fn settle_write<T, E, F, Fut>(
  result: Result<T, E>,
  still_exists: F,
) -> Result<Outcome<T>, E>
where
  E: StoreError,
  F: FnOnce() -> Fut,
  Fut: Future<Output = Result<bool, E>>,
{
  match result {
    Ok(value) => Ok(Outcome::Completed(value)),
    Err(e) if e.is_concurrency_conflict() => {
      if still_exists().await? {
        Err(e)
      } else {
        Ok(Outcome::NotFound)
      }
    }
    Err(e) => Err(e),
  }
}
