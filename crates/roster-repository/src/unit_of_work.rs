//! Scoped unit-of-work over a pooled connection.
//!
//! A `UnitOfWork` owns one transaction. [`UnitOfWork::finish`] commits on
//! success and rolls back on failure; if it is dropped unfinished (early
//! return, timeout, cancelled request) sqlx rolls the transaction back and the
//! connection goes back to the pool.

use roster_core::{RosterError, RosterResult};
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{debug, warn};

/// One transaction bound to one request's repository call.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Connection to run statements on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Ends the unit-of-work according to the outcome of its statements.
    pub async fn finish<T>(self, outcome: Result<T, sqlx::Error>) -> RosterResult<T> {
        match outcome {
            Ok(value) => {
                self.tx.commit().await?;
                debug!("Unit of work committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                debug!("Unit of work rolled back");
                Err(RosterError::from(err))
            }
        }
    }
}
