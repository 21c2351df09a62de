//! Transaction management utilities.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::{lock_error, Database};

impl Database {
    /// Starts an IMMEDIATE transaction.
    ///
    /// The write lock is taken up front, so two writers never both pass
    /// a read-then-insert check. A writer that cannot get the lock within
    /// the busy timeout fails with [`crate::Error::LockTimeout`].
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tablebook::database::{Database, DatabaseConfig};
    /// use tablebook::NewTable;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
    ///
    /// let tx = db.begin_transaction().unwrap();
    /// let table = NewTable::new(1, 4).unwrap();
    /// Database::insert_table(&tx, &table, chrono::Utc::now()).unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config().busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e.into(), seconds))
    }
}
