//! Lifecycle discipline for handles that cross the engine/model boundary.
//!
//! Observations, engines, models and category maps may be backed by objects
//! living in a guest runtime that has to be told when the host is done with
//! them. Every such object implements [`Release`]; short-lived handles are
//! wrapped in [`Scoped`] so release happens exactly once on every exit path,
//! including `?` returns.
//!
//! ## Usage
//!
//! ```
//! use big2_table::guard::{Release, ReleaseError, Scoped};
//!
//! struct Handle;
//!
//! impl Release for Handle {
//!     fn release(&mut self) -> Result<(), ReleaseError> {
//!         Ok(())
//!     }
//! }
//!
//! let handle = Scoped::new("handle", Handle);
//! // ... read through `handle` ...
//! handle.dispose();
//! ```

pub mod scoped;

pub use scoped::Scoped;

use thiserror::Error;

/// Failure to release a boundary handle.
///
/// Always non-fatal: callers log it and continue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to release {resource}: {message}")]
pub struct ReleaseError {
    pub resource: &'static str,
    pub message: String,
}

impl ReleaseError {
    pub fn new(resource: &'static str, message: impl Into<String>) -> Self {
        Self {
            resource,
            message: message.into(),
        }
    }
}

/// An object holding resources the host must hand back explicitly.
///
/// `release` may be called more than once; implementations make the second
/// and later calls no-ops.
pub trait Release {
    fn release(&mut self) -> Result<(), ReleaseError>;
}

impl<T: Release + ?Sized> Release for Box<T> {
    fn release(&mut self) -> Result<(), ReleaseError> {
        (**self).release()
    }
}

/// Release and log instead of returning the failure.
pub fn release_logged<R: Release + ?Sized>(resource: &'static str, handle: &mut R) {
    if let Err(err) = handle.release() {
        tracing::warn!(target: "big2_table::guard", resource, error = %err, "release failed");
    }
}
