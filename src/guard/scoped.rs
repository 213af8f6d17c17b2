//! Scoped ownership of a releasable handle.

use std::fmt;
use std::ops::Deref;

use super::{release_logged, Release, ReleaseError};

/// Owns one handle and releases it exactly once.
///
/// - `release(self)` releases now and reports failure.
/// - `dispose(self)` releases now and logs failure.
/// - Dropping an unreleased guard behaves like `dispose`.
///
/// Reads go through `Deref`. There is no way to take the handle back out, so
/// it cannot outlive the scope that acquired it.
pub struct Scoped<H: Release> {
    label: &'static str,
    handle: Option<H>,
}

impl<H: Release> Scoped<H> {
    /// Take ownership of `handle`. `label` names it in logs.
    pub fn new(label: &'static str, handle: H) -> Self {
        Self {
            label,
            handle: Some(handle),
        }
    }

    /// The label given at construction.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Release the handle and return the outcome.
    pub fn release(mut self) -> Result<(), ReleaseError> {
        self.release_inner()
    }

    /// Release the handle, logging any failure.
    pub fn dispose(mut self) {
        self.dispose_inner();
    }

    fn release_inner(&mut self) -> Result<(), ReleaseError> {
        match self.handle.take() {
            Some(mut handle) => handle.release(),
            None => Ok(()),
        }
    }

    fn dispose_inner(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            release_logged(self.label, &mut handle);
        }
    }
}

impl<H: Release> Deref for Scoped<H> {
    type Target = H;

    fn deref(&self) -> &H {
        // `handle` is only emptied by `release_inner`, which consumes or drops `self`.
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("scoped handle read after release"),
        }
    }
}

impl<H: Release> Drop for Scoped<H> {
    fn drop(&mut self) {
        self.dispose_inner();
    }
}

impl<H: Release + fmt::Debug> fmt::Debug for Scoped<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoped")
            .field("label", &self.label)
            .field("handle", &self.handle)
            .finish()
    }
}
