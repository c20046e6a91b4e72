//! JSON REST API for customers and their notes.
//!
//! Exposes an axum [`Router`] backed by any [`Services`] implementation.
//! Transport concerns (listening, tracing layers) are the caller's
//! responsibility.
//!
//! | Method   | Path                     | Success                     |
//! |----------|--------------------------|-----------------------------|
//! | `GET`    | `/customers`             | 200 + summaries             |
//! | `POST`   | `/customers`             | 201 + detail + `Location`   |
//! | `GET`    | `/customers/{id}`        | 200 + detail                |
//! | `DELETE` | `/customers/{id}`        | 200 + deleted detail        |
//! | `GET`    | `/customers/{id}/notes`  | 200 + notes                 |
//! | `PUT`    | `/customers/{id}/status` | 204                         |
//! | `POST`   | `/notes`                 | 201 + note + `Location`     |
//! | `PUT`    | `/notes/{id}`            | 204                         |

pub mod customers;
pub mod dto;
pub mod error;
pub mod notes;

use axum::{
  Router,
  routing::{get, post, put},
};
use crm_core::repository::{CustomerRepository, NotesRepository};

pub use error::ApiError;

/// Hands out repositories to handlers.
///
/// Each call returns a fresh repository scoped to the calling request. The
/// implementor is built once at startup and cloned into the router state.
pub trait Services: Clone + Send + Sync + 'static {
  type Customers: CustomerRepository;
  type Notes: NotesRepository;

  fn customers(&self) -> Self::Customers;
  fn notes(&self) -> Self::Notes;
}

/// Build the API router over `services`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S: Services>(services: S) -> Router<()> {
  Router::new()
    // Customers
    .route("/customers", get(customers::list::<S>).post(customers::create::<S>))
    .route(
      "/customers/{id}",
      get(customers::get_one::<S>).delete(customers::delete_one::<S>),
    )
    .route("/customers/{id}/notes", get(customers::notes::<S>))
    .route("/customers/{id}/status", put(customers::update_status::<S>))
    // Notes
    .route("/notes", post(notes::create::<S>))
    .route("/notes/{id}", put(notes::update::<S>))
    .with_state(services)
}
