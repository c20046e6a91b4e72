//! Core types and trait definitions for the CRM service.
//!
//! This crate has no HTTP or database dependencies. It owns
//! the domain models, the persisted entity shapes, the persistence-context
//! abstraction, and the repositories that sit on top of it.

pub mod context;
pub mod entity;
pub mod error;
pub mod model;
pub mod outcome;
pub mod repository;
pub mod timestamp;

pub use error::{Error, Result};
pub use outcome::Outcome;
