//! [`Outcome`]: the terminal result of a repository operation.
//!
//! A missing entity is an expected condition, not an error, so it is carried
//! in the `Ok` side of a repository call rather than in its error type.

/// Either the operation completed (with a payload, possibly `()`), or the
/// entity it addressed does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T = ()> {
  Completed(T),
  NotFound,
}

impl<T> Outcome<T> {
  pub fn is_completed(&self) -> bool { matches!(self, Self::Completed(_)) }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound) }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    match self {
      Self::Completed(v) => Outcome::Completed(f(v)),
      Self::NotFound => Outcome::NotFound,
    }
  }

  pub fn completed(self) -> Option<T> {
    match self {
      Self::Completed(v) => Some(v),
      Self::NotFound => None,
    }
  }
}

impl<T> From<Option<T>> for Outcome<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Completed(v),
      None => Self::NotFound,
    }
  }
}
