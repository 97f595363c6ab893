//! Transaction management utilities.
//!
//! Every mutation of the reservation tables runs inside an immediate
//! transaction: the write lock is taken at `BEGIN`, so a lock timeout aborts
//! before anything is changed.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Returns the busy timeout in whole milliseconds.
    #[must_use]
    pub fn busy_timeout_millis(&self) -> u64 {
        u64::try_from(self.busy_timeout().as_millis()).unwrap_or(u64::MAX)
    }

    /// Begins a write transaction that takes the engine's write lock up front.
    ///
    /// The transaction rolls back when dropped without a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is not obtained within the busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Begins a deferred transaction for multi-statement reads that must see
    /// one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_read(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?)
    }

    /// Runs `op` inside an immediate transaction.
    ///
    /// Commits if `op` succeeds and rolls back otherwise. Storage errors are
    /// translated with [`Error::from_store`](crate::Error::from_store), so a
    /// lock wait that exceeds the busy timeout surfaces as
    /// [`Error::StoreTimeout`](crate::Error::StoreTimeout).
    ///
    /// # Errors
    ///
    /// Returns whatever `op` returns, or a translated storage error from
    /// `BEGIN` or `COMMIT`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quend::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/quend.db")).unwrap();
    /// let award = db
    ///     .in_immediate_transaction(|tx| Database::insert_award(tx, "EG90IARU", ""))
    ///     .unwrap();
    /// ```
    pub fn in_immediate_transaction<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let millis = self.busy_timeout_millis();
        self.run_immediate(op)
            .map_err(|e| e.into_store_error(millis))
    }

    fn run_immediate<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let tx = self.begin_immediate()?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Runs `op` inside a read transaction so every statement it issues sees
    /// the same committed state.
    ///
    /// # Errors
    ///
    /// Returns whatever `op` returns, or a translated storage error.
    pub fn in_read_transaction<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let millis = self.busy_timeout_millis();
        let run = |db: &mut Self| -> Result<T> {
            let tx = db.begin_read()?;
            let value = op(&tx)?;
            tx.finish()?;
            Ok(value)
        };
        run(self).map_err(|e| e.into_store_error(millis))
    }
}
