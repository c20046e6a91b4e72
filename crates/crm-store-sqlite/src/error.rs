//! Error type for `crm-store-sqlite`.

use crm_core::context::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] crm_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A compare-and-set write matched no row: the row was changed or deleted
  /// after it was read.
  #[error("{entity} {id} was changed or removed concurrently")]
  Concurrency { entity: &'static str, id: i32 },

  #[error("row id {0} does not fit in an i32")]
  IdOutOfRange(i64),
}

impl StoreError for Error {
  fn is_concurrency_conflict(&self) -> bool {
    matches!(self, Self::Concurrency { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
