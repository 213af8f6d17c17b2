//! Session context: the engine, model and codec a table runs on.
//!
//! A session is built once and torn down once. `teardown` releases all three
//! parts even when one of them fails; dropping a session that was never torn
//! down does the same on a best-effort basis.

use crate::codec::Codec;
use crate::core::{TableError, TableResult};
use crate::guard::{Release, ReleaseError};
use crate::nn::PolicyModel;
use crate::rules::RuleEngine;

/// Owns one engine, one model and one codec.
pub struct Session<E: RuleEngine, M: PolicyModel> {
    engine: E,
    model: M,
    codec: Codec,
    closed: bool,
}

impl<E: RuleEngine, M: PolicyModel> Session<E, M> {
    pub fn new(engine: E, model: M, codec: Codec) -> Self {
        Self {
            engine,
            model,
            codec,
            closed: false,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn engine(&self) -> TableResult<&E> {
        self.ensure_open()?;
        Ok(&self.engine)
    }

    pub fn engine_mut(&mut self) -> TableResult<&mut E> {
        self.ensure_open()?;
        Ok(&mut self.engine)
    }

    pub fn model(&self) -> TableResult<&M> {
        self.ensure_open()?;
        Ok(&self.model)
    }

    pub fn codec(&self) -> TableResult<&Codec> {
        self.ensure_open()?;
        Ok(&self.codec)
    }

    /// Engine for stepping alongside the model and codec for deciding.
    pub(crate) fn parts_mut(&mut self) -> TableResult<(&mut E, &M, &Codec)> {
        self.ensure_open()?;
        Ok((&mut self.engine, &self.model, &self.codec))
    }

    /// Release engine, model and codec.
    ///
    /// Runs once; later calls return `Ok(())`. All three releases are
    /// attempted and the first failure is returned.
    pub fn teardown(&mut self) -> Result<(), ReleaseError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let results = [
            self.engine.release(),
            self.model.release(),
            self.codec.release(),
        ];
        tracing::debug!(target: "big2_table::guard", "session torn down");
        results.into_iter().collect()
    }

    fn ensure_open(&self) -> TableResult<()> {
        if self.closed {
            Err(TableError::SessionClosed)
        } else {
            Ok(())
        }
    }
}

impl<E: RuleEngine, M: PolicyModel> Drop for Session<E, M> {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            tracing::warn!(
                target: "big2_table::guard",
                error = %err,
                "session teardown on drop failed"
            );
        }
    }
}

impl<E: RuleEngine, M: PolicyModel> std::fmt::Debug for Session<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("codec", &self.codec)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
