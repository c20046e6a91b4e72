//! Error types for `crm-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Carries the rejected text; the message is fixed because it is surfaced
  /// verbatim to API clients.
  #[error("unrecognised status")]
  UnrecognisedStatus(String),

  #[error("invalid timestamp {value:?}: {source}")]
  Timestamp {
    value:  String,
    #[source]
    source: chrono::ParseError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
