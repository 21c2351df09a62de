//! Table registry queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::table::{NewTable, Table, TableId};

use super::connection::{is_unique_violation, Database};
use super::rows::{row_to_table, to_unix_secs};
use super::schema::TABLE_COLUMNS;

const INSERT_TABLE: &str = r"
    INSERT INTO tables (table_number, capacity, is_active, created_at, updated_at)
    VALUES (?, ?, 1, ?, ?)
";

const UPDATE_TABLE: &str = r"
    UPDATE tables
    SET capacity = ?, is_active = ?, updated_at = ?
    WHERE id = ?
";

impl Database {
    /// Registers a new, active table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTable`] if the number is already taken by
    /// any table, active or not.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tablebook::database::{Database, DatabaseConfig};
    /// use tablebook::NewTable;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
    /// let table = Database::insert_table(
    ///     db.connection(),
    ///     &NewTable::new(1, 4).unwrap(),
    ///     chrono::Utc::now(),
    /// )
    /// .unwrap();
    /// assert!(table.is_active);
    /// ```
    pub fn insert_table(conn: &Connection, table: &NewTable, now: DateTime<Utc>) -> Result<Table> {
        let secs = to_unix_secs(now);
        conn.execute(
            INSERT_TABLE,
            params![table.table_number, table.capacity, secs, secs],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::DuplicateTable {
                    table_number: table.table_number,
                }
            } else {
                e.into()
            }
        })?;

        let id = TableId::new(conn.last_insert_rowid());
        Self::get_table(conn, id)?.ok_or_else(|| Error::not_found(format!("table {id}")))
    }

    /// Looks up a table by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_table(conn: &Connection, id: TableId) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables WHERE id = ?");
        let table = conn
            .query_row(&sql, [id.value()], row_to_table)
            .optional()?;
        Ok(table)
    }

    /// Looks up a table by its public number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_table_by_number(conn: &Connection, table_number: u32) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables WHERE table_number = ?");
        let table = conn
            .query_row(&sql, [table_number], row_to_table)
            .optional()?;
        Ok(table)
    }

    /// Lists tables ordered by table number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables(conn: &Connection, active_only: bool) -> Result<Vec<Table>> {
        let filter = if active_only { "WHERE is_active = 1" } else { "" };
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables {filter} ORDER BY table_number");

        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([], row_to_table)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(tables)
    }

    /// Active tables seating at least `party_size`, by table number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables_seating(conn: &Connection, party_size: u32) -> Result<Vec<Table>> {
        let sql = format!(
            "SELECT {TABLE_COLUMNS} FROM tables WHERE is_active = 1 AND capacity >= ? ORDER BY table_number"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([party_size], row_to_table)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(tables)
    }

    /// Writes capacity and active flag back for an existing table.
    ///
    /// Returns `false` if no table has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn store_table(conn: &Connection, table: &Table) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_TABLE,
            params![
                table.capacity,
                table.is_active,
                to_unix_secs(table.updated_at),
                table.id.value()
            ],
        )?;
        Ok(rows > 0)
    }

    /// Counts registered tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_tables(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tables", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{add_table, create_test_database};
    use crate::TableUpdate;

    #[test]
    fn test_insert_and_get_table() {
        let db = create_test_database();
        let conn = db.connection();

        let table = add_table(conn, 3, 4);
        assert_eq!(table.table_number, 3);
        assert_eq!(table.capacity, 4);
        assert!(table.is_active);

        let fetched = Database::get_table(conn, table.id).unwrap().unwrap();
        assert_eq!(fetched, table);

        let by_number = Database::get_table_by_number(conn, 3).unwrap().unwrap();
        assert_eq!(by_number.id, table.id);
    }

    #[test]
    fn test_get_missing_table() {
        let db = create_test_database();
        assert!(Database::get_table(db.connection(), TableId::new(42))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_number_rejected_even_when_inactive() {
        let db = create_test_database();
        let conn = db.connection();

        let table = add_table(conn, 1, 2);
        let deactivated = TableUpdate::default().with_active(false).apply(&table);
        assert!(Database::store_table(conn, &deactivated).unwrap());

        let err =
            Database::insert_table(conn, &NewTable::new(1, 6).unwrap(), Utc::now()).unwrap_err();
        assert!(matches!(err, Error::DuplicateTable { table_number: 1 }));
    }

    #[test]
    fn test_list_tables_ordering_and_filter() {
        let db = create_test_database();
        let conn = db.connection();

        let t5 = add_table(conn, 5, 2);
        add_table(conn, 2, 4);
        add_table(conn, 9, 8);
        Database::store_table(conn, &TableUpdate::default().with_active(false).apply(&t5)).unwrap();

        let all: Vec<u32> = Database::list_tables(conn, false)
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(all, vec![2, 5, 9]);

        let active: Vec<u32> = Database::list_tables(conn, true)
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(active, vec![2, 9]);
    }

    #[test]
    fn test_list_tables_seating() {
        let db = create_test_database();
        let conn = db.connection();

        add_table(conn, 1, 2);
        add_table(conn, 2, 4);
        add_table(conn, 3, 6);

        let seating: Vec<u32> = Database::list_tables_seating(conn, 4)
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(seating, vec![2, 3]);
    }

    #[test]
    fn test_store_missing_table_reports_false() {
        let db = create_test_database();
        let conn = db.connection();
        let mut table = add_table(conn, 1, 2);
        table.id = TableId::new(999);
        assert!(!Database::store_table(conn, &table).unwrap());
    }
}
