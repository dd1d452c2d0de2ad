//! Request preprocessor for filegraph.
//!
//! Clients address deletes and relocations at any level of the hierarchy,
//! but the storage layer can only act on a whole fileset at once. The
//! [`Preprocessor`] rewrites an ordered request list so that:
//! - every fileset whose images are all touched by one operation gets a
//!   fileset-level request of that operation, placed right after the request
//!   that completed it
//! - image-level requests swallowed by such a fileset request are dropped
//! - everything else passes through in its original order
//!
//! The rewrite is pure apart from oracle lookups, runs on the caller's
//! thread, and is idempotent: feeding its output back in changes nothing.

mod config;
mod engine;
mod error;
mod resolve;

pub use config::PreprocessConfig;
pub use engine::{PreprocessReport, Preprocessor};
pub use error::{PreprocessError, PreprocessResult};
