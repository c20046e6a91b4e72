//! The `CustomerContext` trait, the persistence collaborator.
//!
//! The trait is implemented by storage backends (e.g. `crm-store-sqlite`).
//! Repositories depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::entity::{Customer, Note};

/// Errors raised by a [`CustomerContext`].
///
/// A backend must be able to say whether a failed save or remove was caused
/// by the row having changed or vanished since it was read. Every other
/// failure is treated as fatal by the repositories.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_concurrency_conflict(&self) -> bool;
}

/// Entity-level access to the relational store.
///
/// Writes of existing rows are optimistic: `save_*` and `remove_*` compare
/// the entity's `row_version` with the stored one and fail with a
/// concurrency conflict on mismatch or if the row is gone.
///
/// All methods return `Send` futures so implementations can be driven from a
/// multi-threaded runtime.
pub trait CustomerContext: Send + Sync {
  type Error: StoreError;

  // ── Customers ─────────────────────────────────────────────────────────

  /// Every customer, ordered by id.
  fn customers(
    &self,
  ) -> impl Future<Output = Result<Vec<Customer>, Self::Error>> + Send + '_;

  fn find_customer(
    &self,
    id: i32,
  ) -> impl Future<Output = Result<Option<Customer>, Self::Error>> + Send + '_;

  /// Insert a customer and return it with its assigned id and row version.
  /// The caller's `id` is ignored.
  fn add_customer(
    &self,
    customer: Customer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Persist changes to an existing customer, returning it with its new row
  /// version.
  fn save_customer(
    &self,
    customer: Customer,
  ) -> impl Future<Output = Result<Customer, Self::Error>> + Send + '_;

  /// Delete a customer and, by cascade, its notes.
  fn remove_customer(
    &self,
    customer: Customer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Notes belonging to `customer_id`, ordered by id. Empty if the customer
  /// does not exist.
  fn notes_for(
    &self,
    customer_id: i32,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  fn find_note(
    &self,
    id: i32,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// Insert a note. Fails if `customer_id` does not reference a customer.
  fn add_note(
    &self,
    note: Note,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  fn save_note(
    &self,
    note: Note,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;
}
