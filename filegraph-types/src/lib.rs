//! Core type definitions for filegraph.
//!
//! This crate defines the plain value types shared by the rest of the
//! workspace:
//! - [`EntityType`] and [`Target`] — what a request points at
//! - [`Operation`] and [`Request`] — what a client asks to be done to it
//!
//! Nothing here knows how entities relate to each other; containment is
//! declared by `filegraph-hierarchy` and answered by `filegraph-oracle`.

mod request;
mod target;

pub use request::{Operation, OperationKind, Request};
pub use target::{EntityType, Target};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),
}
